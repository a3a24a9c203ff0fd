use async_graphql::*;

use crate::services::{LinkOrder, LinkOrderField, SortDirection};

/// Sort order for `feed`. Names follow the `<field>_<DIRECTION>` wire format.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LinkOrderByInput {
    #[graphql(name = "description_ASC")]
    DescriptionAsc,
    #[graphql(name = "description_DESC")]
    DescriptionDesc,
    #[graphql(name = "url_ASC")]
    UrlAsc,
    #[graphql(name = "url_DESC")]
    UrlDesc,
    #[graphql(name = "createdAt_ASC")]
    CreatedAtAsc,
    #[graphql(name = "createdAt_DESC")]
    CreatedAtDesc,
}

impl From<LinkOrderByInput> for LinkOrder {
    fn from(input: LinkOrderByInput) -> Self {
        use LinkOrderByInput::*;

        let (field, direction) = match input {
            DescriptionAsc => (LinkOrderField::Description, SortDirection::Asc),
            DescriptionDesc => (LinkOrderField::Description, SortDirection::Desc),
            UrlAsc => (LinkOrderField::Url, SortDirection::Asc),
            UrlDesc => (LinkOrderField::Url, SortDirection::Desc),
            CreatedAtAsc => (LinkOrderField::CreatedAt, SortDirection::Asc),
            CreatedAtDesc => (LinkOrderField::CreatedAt, SortDirection::Desc),
        };

        LinkOrder::new(field, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_mapping() {
        assert_eq!(
            LinkOrder::from(LinkOrderByInput::CreatedAtDesc),
            LinkOrder::new(LinkOrderField::CreatedAt, SortDirection::Desc)
        );
        assert_eq!(
            LinkOrder::from(LinkOrderByInput::UrlAsc),
            LinkOrder::new(LinkOrderField::Url, SortDirection::Asc)
        );
    }
}
