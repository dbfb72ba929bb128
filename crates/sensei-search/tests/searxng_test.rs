use mockito::Matcher;
use sensei_search::{Category, SearchClient, SearchConfig, SearxngClient};
use serde_json::json;

#[tokio::test]
async fn test_searxng_buckets_caps_and_filters() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let mut results = Vec::new();
    for i in 0..7 {
        results.push(json!({
            "url": format!("https://news.example/{i}"),
            "title": format!("France {i}"),
            "content": "Paris is the capital of France.",
            "engines": ["google", "bing"],
            "score": 3.0,
            "category": "general"
        }));
    }
    results.push(json!({"url": "https://img.example/a", "title": "Eiffel", "category": "images", "score": 2.0, "img_src": format!("{base}/a.jpg")}));
    results.push(json!({"url": "https://img.example/b", "title": "Low", "category": "images", "score": 0.5, "img_src": format!("{base}/b.jpg")}));
    results.push(json!({"url": "https://img.example/c", "title": "Dead", "category": "images", "score": 2.0, "img_src": format!("{base}/c.jpg")}));
    results.push(json!({"url": "https://video.example/a", "title": "Tour", "category": "videos", "score": 4.5}));
    results.push(json!({"url": "https://video.example/b", "title": "Weak", "category": "videos", "score": 3.9}));

    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "paris landmarks".into()),
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("pageno".into(), "1".into()),
            Matcher::UrlEncoded("categories".into(), "general,images,videos".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"results": results}).to_string())
        .create_async()
        .await;
    server.mock("HEAD", "/a.jpg").with_status(200).create_async().await;
    server.mock("HEAD", "/c.jpg").with_status(404).create_async().await;

    let client = SearxngClient::new(SearchConfig::searxng(base.clone())).unwrap();
    let found = client
        .search("paris landmarks", &[Category::General, Category::Images, Category::Videos])
        .await
        .unwrap();

    search.assert_async().await;
    assert_eq!(found.general.len(), 5);
    assert_eq!(found.general[0].url, "https://news.example/0");
    assert_eq!(
        found.images.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
        vec!["https://img.example/a"]
    );
    assert_eq!(
        found.videos.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
        vec!["https://video.example/a"]
    );
}

#[tokio::test]
async fn test_searxng_unrequested_buckets_stay_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("categories".into(), "general".into()))
        .with_status(200)
        .with_body(
            json!({"results": [
                {"url": "https://a.example", "category": "general", "score": 1.0},
                {"url": "https://v.example", "category": "videos", "score": 9.0}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = SearxngClient::new(SearchConfig::searxng(server.url())).unwrap();
    let found = client.search("capital of France", &[Category::General]).await.unwrap();

    assert_eq!(found.general.len(), 1);
    assert!(found.videos.is_empty());
    assert!(found.images.is_empty());
}

#[tokio::test]
async fn test_searxng_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = SearxngClient::new(SearchConfig::searxng(server.url())).unwrap();
    let err = client.search("anything", &[Category::General]).await.unwrap_err();

    assert!(err.to_string().contains("503"));
}
