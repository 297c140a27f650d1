use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// Client-side navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Catalog,
    Detail(u64),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/auth/login"),
            Route::Catalog => write!(f, "/recipes"),
            Route::Detail(id) => write!(f, "/recipes/{}", id),
        }
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let trimmed = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["recipes"] => Ok(Route::Catalog),
            ["auth", "login"] => Ok(Route::Login),
            ["recipes", id] => id
                .parse()
                .map(Route::Detail)
                .map_err(|_| DomainError::NotFound(format!("no route for {}", path))),
            _ => Err(DomainError::NotFound(format!("no route for {}", path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Catalog);
        assert_eq!("/recipes".parse::<Route>().unwrap(), Route::Catalog);
        assert_eq!("/recipes/".parse::<Route>().unwrap(), Route::Catalog);
        assert_eq!("/auth/login".parse::<Route>().unwrap(), Route::Login);
        assert_eq!("/recipes/12".parse::<Route>().unwrap(), Route::Detail(12));
        assert_eq!("/recipes/12?tab=rating".parse::<Route>().unwrap(), Route::Detail(12));
    }

    #[test]
    fn test_unknown_routes_are_rejected() {
        assert!("/recipes/tags".parse::<Route>().is_err());
        assert!("/carts".parse::<Route>().is_err());
        assert!("/recipes/1/rate".parse::<Route>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for route in [Route::Login, Route::Catalog, Route::Detail(3)] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }
}
