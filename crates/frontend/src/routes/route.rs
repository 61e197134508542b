//! Application routes and their URL form.

use std::collections::HashMap;

use contracts::enums::ProductCategory;

/// Query of `/productos`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub category: Option<ProductCategory>,
    pub search: Option<String>,
    /// Products of an offer; when non-empty the catalog lists exactly these
    pub names: Vec<String>,
}

impl CatalogQuery {
    pub fn search(text: &str) -> Self {
        let text = text.trim();
        Self {
            search: (!text.is_empty()).then(|| text.to_string()),
            ..Default::default()
        }
    }

    pub fn category(category: ProductCategory) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn names(names: Vec<String>) -> Self {
        Self {
            names,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Catalog(CatalogQuery),
    /// Raw id segment; the page validates it
    Product(String),
    Stock,
    Profile,
    Verify { token: Option<String> },
}

impl Route {
    /// Parses `pathname` and `search` (with or without the leading `?`).
    /// Unknown paths resolve to the home page.
    pub fn parse(path: &str, search: &str) -> Self {
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        let param = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Home,
            "/productos" => Route::Catalog(CatalogQuery {
                category: param("category").as_deref().and_then(ProductCategory::from_code),
                search: param("search"),
                names: param("names").map(|n| split_names(&n)).unwrap_or_default(),
            }),
            "/stock" => Route::Stock,
            "/usuario" => Route::Profile,
            "/verify" => Route::Verify {
                token: param("token"),
            },
            _ => match path.strip_prefix("/producto/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Product(id.to_string()),
                _ => Route::Home,
            },
        }
    }

    pub fn to_url(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Catalog(q) => {
                let mut pairs = Vec::new();
                if let Some(category) = q.category {
                    pairs.push(format!("category={}", category.code()));
                }
                if let Some(search) = &q.search {
                    pairs.push(format!("search={}", urlencoding::encode(search)));
                }
                if !q.names.is_empty() {
                    let names: Vec<String> = q
                        .names
                        .iter()
                        .map(|n| urlencoding::encode(n).into_owned())
                        .collect();
                    pairs.push(format!("names={}", names.join(",")));
                }
                if pairs.is_empty() {
                    "/productos".to_string()
                } else {
                    format!("/productos?{}", pairs.join("&"))
                }
            }
            Route::Product(id) => format!("/producto/{}", id),
            Route::Stock => "/stock".to_string(),
            Route::Profile => "/usuario".to_string(),
            Route::Verify { token } => match token {
                Some(t) => format!("/verify?token={}", urlencoding::encode(t)),
                None => "/verify".to_string(),
            },
        }
    }

    pub fn is_catalog(&self) -> bool {
        matches!(self, Route::Catalog(_))
    }
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|n| {
            urlencoding::decode(n.trim())
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| n.trim().to_string())
        })
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/", ""), Route::Home);
        assert_eq!(Route::parse("/stock", ""), Route::Stock);
        assert_eq!(Route::parse("/usuario/", ""), Route::Profile);
        assert_eq!(Route::parse("/producto/12", ""), Route::Product("12".into()));
        assert_eq!(Route::parse("/nope", ""), Route::Home);
        assert_eq!(
            Route::parse("/verify", "?token=abc"),
            Route::Verify {
                token: Some("abc".into())
            }
        );
    }

    #[test]
    fn catalog_query_round_trips() {
        let route = Route::Catalog(CatalogQuery {
            category: Some(ProductCategory::Oftalmologicos),
            search: Some("gotas para ojos".into()),
            names: vec![],
        });
        let url = route.to_url();
        let (path, query) = url.split_once('?').unwrap();
        assert_eq!(Route::parse(path, query), route);

        let offer = Route::Catalog(CatalogQuery::names(vec![
            "Aspirina".into(),
            "Jarabe niños".into(),
        ]));
        let url = offer.to_url();
        let (path, query) = url.split_once('?').unwrap();
        assert_eq!(Route::parse(path, query), offer);
    }

    #[test]
    fn names_are_trimmed_and_blank_ones_dropped() {
        match Route::parse("/productos", "names=Aspirina,%20,Ibuprofeno%20") {
            Route::Catalog(q) => assert_eq!(q.names, vec!["Aspirina", "Ibuprofeno"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_category_is_ignored() {
        match Route::parse("/productos", "category=FOO&search=%20") {
            Route::Catalog(q) => assert_eq!(q, CatalogQuery::default()),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(Route::Catalog(CatalogQuery::default()).to_url(), "/productos");
    }
}
