use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use crate::database::entities::{links, users, votes};
use crate::errors::{LinkError, LinkResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOrderField {
    Description,
    Url,
    CreatedAt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkOrder {
    pub field: LinkOrderField,
    pub direction: SortDirection,
}

impl LinkOrder {
    pub fn new(field: LinkOrderField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn column(&self) -> links::Column {
        match self.field {
            LinkOrderField::Description => links::Column::Description,
            LinkOrderField::Url => links::Column::Url,
            LinkOrderField::CreatedAt => links::Column::CreatedAt,
        }
    }

    fn order(&self) -> Order {
        match self.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Arguments of the `feed` query
#[derive(Clone, Debug, Default)]
pub struct FeedQuery {
    /// Substring matched against description or url
    pub filter: Option<String>,
    pub skip: Option<i32>,
    pub first: Option<i32>,
    pub order_by: Option<LinkOrder>,
}

/// One page of the feed plus the total number of links
#[derive(Clone, Debug)]
pub struct FeedPage {
    pub links: Vec<links::Model>,
    pub count: u64,
}

#[derive(Clone)]
pub struct LinkService {
    db: DatabaseConnection,
}

impl LinkService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn feed(&self, query: FeedQuery) -> LinkResult<FeedPage> {
        let skip = non_negative("skip", query.skip)?;
        let first = non_negative("first", query.first)?;

        // Total over all links; the filter only narrows the page
        let count = links::Entity::find().count(&self.db).await?;

        let mut select = links::Entity::find();

        if let Some(filter) = query.filter.as_deref().filter(|f| !f.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(links::Column::Description.contains(filter))
                    .add(links::Column::Url.contains(filter)),
            );
        }

        select = match query.order_by {
            Some(order) => select
                .order_by(order.column(), order.order())
                .order_by_asc(links::Column::Id),
            None => select.order_by_asc(links::Column::Id),
        };

        let links = select.offset(skip).limit(first).all(&self.db).await?;

        Ok(FeedPage { links, count })
    }

    pub async fn find(&self, id: i32) -> LinkResult<Option<links::Model>> {
        Ok(links::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(
        &self,
        posted_by_id: i32,
        url: &str,
        description: &str,
    ) -> LinkResult<links::Model> {
        let url = required("url", url)?;
        let description = required("description", description)?;

        let link = links::ActiveModel::new(url, description, posted_by_id)
            .insert(&self.db)
            .await?;

        info!("User {} posted link {}", posted_by_id, link.id);
        Ok(link)
    }

    /// Change url and/or description; `None` leaves a field untouched.
    pub async fn update(
        &self,
        id: i32,
        url: Option<&str>,
        description: Option<&str>,
    ) -> LinkResult<links::Model> {
        let link = self.find(id).await?.ok_or(LinkError::NotFound(id))?;

        if url.is_none() && description.is_none() {
            return Ok(link);
        }

        let mut active: links::ActiveModel = link.into();

        if let Some(url) = url {
            active.url = Set(required("url", url)?);
        }

        if let Some(description) = description {
            active.description = Set(required("description", description)?);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Remove a link and return the row as it was. Its votes go with it.
    pub async fn delete(&self, id: i32) -> LinkResult<links::Model> {
        let link = self.find(id).await?.ok_or(LinkError::NotFound(id))?;

        link.clone().delete(&self.db).await?;
        info!("Deleted link {}", id);

        Ok(link)
    }

    pub async fn posted_by(&self, link: &links::Model) -> LinkResult<Option<users::Model>> {
        match link.posted_by_id {
            Some(user_id) => Ok(users::Entity::find_by_id(user_id).one(&self.db).await?),
            None => Ok(None),
        }
    }

    pub async fn votes_for(&self, link_id: i32) -> LinkResult<Vec<votes::Model>> {
        Ok(votes::Entity::find()
            .filter(votes::Column::LinkId.eq(link_id))
            .order_by_asc(votes::Column::Id)
            .all(&self.db)
            .await?)
    }
}

fn non_negative(name: &str, value: Option<i32>) -> LinkResult<Option<u64>> {
    match value {
        Some(v) if v < 0 => Err(LinkError::InvalidPagination(format!(
            "{} must not be negative",
            name
        ))),
        Some(v) => Ok(Some(v as u64)),
        None => Ok(None),
    }
}

fn required(name: &str, value: &str) -> LinkResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Invalid(format!("{} cannot be empty", name)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    async fn seed_user(db: &DatabaseConnection) -> users::Model {
        users::ActiveModel::new(
            "Poster".to_string(),
            "poster@example.com".to_string(),
            "hash".to_string(),
        )
        .insert(db)
        .await
        .unwrap()
    }

    async fn seed_links(service: &LinkService, user_id: i32) {
        service
            .create(user_id, "https://rust-lang.org", "Rust language")
            .await
            .unwrap();
        service
            .create(user_id, "https://graphql.org", "GraphQL spec")
            .await
            .unwrap();
        service
            .create(user_id, "https://tokio.rs", "Async runtime for Rust")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_feed_filter_matches_description_or_url() {
        let (db, _file) = setup_test_db().await;
        let user = seed_user(&db).await;
        let service = LinkService::new(db);
        seed_links(&service, user.id).await;

        let page = service
            .feed(FeedQuery {
                filter: Some("rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        // "rust-lang.org" by url, "Async runtime for Rust" by description
        assert_eq!(page.links.len(), 2);
        // Count covers every link, not only the matches
        assert_eq!(page.count, 3);

        let page = service
            .feed(FeedQuery {
                filter: Some("graphql.org".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].description, "GraphQL spec");
    }

    #[tokio::test]
    async fn test_feed_paging_and_order() {
        let (db, _file) = setup_test_db().await;
        let user = seed_user(&db).await;
        let service = LinkService::new(db);
        seed_links(&service, user.id).await;

        let page = service
            .feed(FeedQuery {
                skip: Some(1),
                first: Some(1),
                order_by: Some(LinkOrder::new(
                    LinkOrderField::Description,
                    SortDirection::Asc,
                )),
                ..Default::default()
            })
            .await
            .unwrap();

        // Count ignores paging
        assert_eq!(page.count, 3);
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].description, "GraphQL spec");

        let page = service
            .feed(FeedQuery {
                order_by: Some(LinkOrder::new(LinkOrderField::Url, SortDirection::Desc)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.links[0].url, "https://tokio.rs");
    }

    #[tokio::test]
    async fn test_feed_rejects_negative_paging() {
        let (db, _file) = setup_test_db().await;
        let service = LinkService::new(db);

        let err = service
            .feed(FeedQuery {
                skip: Some(-1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::InvalidPagination(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, _file) = setup_test_db().await;
        let user = seed_user(&db).await;
        let service = LinkService::new(db);

        let link = service
            .create(user.id, "https://example.com", "Example")
            .await
            .unwrap();

        let updated = service
            .update(link.id, None, Some("Better example"))
            .await
            .unwrap();
        assert_eq!(updated.url, "https://example.com");
        assert_eq!(updated.description, "Better example");

        let deleted = service.delete(link.id).await.unwrap();
        assert_eq!(deleted.description, "Better example");
        assert!(service.find(link.id).await.unwrap().is_none());

        assert!(matches!(
            service.delete(link.id).await.unwrap_err(),
            LinkError::NotFound(_)
        ));
        assert!(matches!(
            service.update(link.id, Some("https://x.io"), None).await.unwrap_err(),
            LinkError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_url() {
        let (db, _file) = setup_test_db().await;
        let user = seed_user(&db).await;
        let service = LinkService::new(db);

        let err = service.create(user.id, "  ", "desc").await.unwrap_err();
        assert!(matches!(err, LinkError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_posted_by() {
        let (db, _file) = setup_test_db().await;
        let user = seed_user(&db).await;
        let service = LinkService::new(db);

        let link = service
            .create(user.id, "https://example.com", "Example")
            .await
            .unwrap();

        let poster = service.posted_by(&link).await.unwrap().unwrap();
        assert_eq!(poster.id, user.id);
    }
}
