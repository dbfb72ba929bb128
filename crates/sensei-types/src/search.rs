use serde::{Deserialize, Serialize};

/// Search category a backend is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Images,
    Videos,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hit from a search backend, normalized across backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Image source for image hits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub engines: Vec<String>,
    pub category: Category,
}

impl SearchResult {
    pub fn new(category: Category, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            content: String::new(),
            thumbnail: None,
            score: 0.0,
            engines: Vec::new(),
            category,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_engines(mut self, engines: Vec<String>) -> Self {
        self.engines = engines;
        self
    }
}

/// Results bucketed by category. Buckets that were not requested stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    #[serde(default)]
    pub general: Vec<SearchResult>,
    #[serde(default)]
    pub images: Vec<SearchResult>,
    #[serde(default)]
    pub videos: Vec<SearchResult>,
}

impl SearchResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.images.is_empty() && self.videos.is_empty()
    }

    pub fn bucket(&self, category: Category) -> &[SearchResult] {
        match category {
            Category::General => &self.general,
            Category::Images => &self.images,
            Category::Videos => &self.videos,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<SearchResult> {
        match category {
            Category::General => &mut self.general,
            Category::Images => &mut self.images,
            Category::Videos => &mut self.videos,
        }
    }

    /// Client-facing web results for the general bucket
    pub fn web_results(&self) -> Vec<WebResult> {
        self.general.iter().map(WebResult::from).collect()
    }

    /// Images first, then videos. Images without a source are skipped.
    pub fn mediums(&self) -> Vec<Medium> {
        let images = self.images.iter().filter_map(|r| {
            r.thumbnail.as_ref().map(|image| Medium::Image {
                url: r.url.clone(),
                image: image.clone(),
            })
        });
        let videos = self.videos.iter().map(|r| Medium::Video { url: r.url.clone() });

        images.chain(videos).collect()
    }
}

/// Web result as shown to the client and stored with the turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl From<&SearchResult> for WebResult {
    fn from(result: &SearchResult) -> Self {
        Self {
            url: result.url.clone(),
            title: result.title.clone(),
            content: result.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "medium", rename_all = "lowercase")]
pub enum Medium {
    Image { url: String, image: String },
    Video { url: String },
}
