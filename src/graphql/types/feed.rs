use async_graphql::*;

use crate::graphql::types::Link;
use crate::services::FeedPage;

/// One page of links and the total number matching the filter
#[derive(SimpleObject)]
pub struct Feed {
    pub links: Vec<Link>,
    pub count: i32,
}

impl From<FeedPage> for Feed {
    fn from(page: FeedPage) -> Self {
        Self {
            links: page.links.into_iter().map(Link::from).collect(),
            count: i32::try_from(page.count).unwrap_or(i32::MAX),
        }
    }
}
