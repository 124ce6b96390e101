#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub id: String,
    pub title: String,
    pub link: String,
    pub date: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub channel_title: Option<String>,
    pub posts: Vec<ParsedPost>,
}
