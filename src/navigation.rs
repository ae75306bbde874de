//! Screen navigation stack
//!
//! Three routes: the entry screen, the restaurant list and a detail screen
//! that receives its restaurant by value. The bottom of the stack is always
//! `Home`.

use crate::data::Restaurant;

/// Root every stack starts from
static ROOT: Route = Route::Home;

/// A screen on the navigation stack
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Entry screen
    Home,
    /// Restaurant list
    Restaurants,
    /// Details of one restaurant, passed by value
    Details { restaurant: Restaurant },
}

impl Route {
    /// Route name as exposed to the rest of the app
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Restaurants => "Resturants",
            Route::Details { .. } => "Details",
        }
    }

    /// Title shown in the screen header
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Restaurants => "Restaurants".to_string(),
            Route::Details { restaurant } => restaurant.name.clone(),
        }
    }

    /// The restaurant parameter of a `Details` route
    pub fn restaurant(&self) -> Option<&Restaurant> {
        match self {
            Route::Details { restaurant } => Some(restaurant),
            _ => None,
        }
    }
}

/// Stack of open screens (bottom = root, top = current)
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationStack {
    stack: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    /// Create a stack holding only `Home`
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    /// The screen on top
    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&ROOT)
    }

    /// Push a screen on top.
    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pop the current screen. Returns `None` at the root.
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Go to `route`: back to an existing screen of the same name, otherwise push
    ///
    /// Returns the screens removed from the stack, top first.
    pub fn navigate(&mut self, route: Route) -> Vec<Route> {
        let Some(index) = self.stack.iter().rposition(|r| r.name() == route.name()) else {
            self.push(route);
            return Vec::new();
        };

        let mut removed: Vec<Route> = self.stack.drain(index + 1..).rev().collect();
        let previous = std::mem::replace(&mut self.stack[index], route);
        if previous != self.stack[index] {
            removed.push(previous);
        }
        removed
    }

    /// Whether a screen with this name is on the stack
    pub fn contains(&self, name: &str) -> bool {
        self.stack.iter().any(|r| r.name() == name)
    }

    /// Screen titles from root to top
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.stack.iter().map(Route::title).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_restaurant() -> Restaurant {
        let mut restaurant = Restaurant::new("Orfali Bros", "https://example.com/orfali.jpg");
        restaurant.extra.insert("rating".to_string(), json!(4.8));
        restaurant
            .extra
            .insert("categories".to_string(), json!([{ "title": "Bistro" }]));
        restaurant
    }

    #[test]
    fn test_new_stack_starts_at_home() {
        let stack = NavigationStack::new();
        assert_eq!(stack.current(), &Route::Home);
        assert_eq!(stack.breadcrumbs(), vec!["Home".to_string()]);
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::Home.name(), "Home");
        assert_eq!(Route::Restaurants.name(), "Resturants");
        assert_eq!(
            Route::Details {
                restaurant: sample_restaurant()
            }
            .name(),
            "Details"
        );
    }

    #[test]
    fn test_details_params_roundtrip() {
        let mut stack = NavigationStack::new();
        let restaurant = sample_restaurant();

        stack.push(Route::Restaurants);
        stack.push(Route::Details {
            restaurant: restaurant.clone(),
        });

        assert_eq!(stack.current().restaurant(), Some(&restaurant));
    }

    #[test]
    fn test_pop_at_root_is_none() {
        let mut stack = NavigationStack::new();
        assert!(stack.pop().is_none());
        assert_eq!(stack.current(), &Route::Home);
    }

    #[test]
    fn test_pop_returns_removed_route() {
        let mut stack = NavigationStack::new();
        stack.push(Route::Restaurants);

        assert_eq!(stack.pop(), Some(Route::Restaurants));
        assert_eq!(stack.current(), &Route::Home);
    }

    #[test]
    fn test_navigate_pushes_new_route() {
        let mut stack = NavigationStack::new();

        let removed = stack.navigate(Route::Restaurants);

        assert!(removed.is_empty());
        assert_eq!(stack.current(), &Route::Restaurants);
    }

    #[test]
    fn test_navigate_to_existing_route_pops_back() {
        let mut stack = NavigationStack::new();
        stack.push(Route::Restaurants);
        stack.push(Route::Details {
            restaurant: sample_restaurant(),
        });

        let removed = stack.navigate(Route::Home);

        assert_eq!(stack.current(), &Route::Home);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[1], Route::Restaurants);
        assert!(!stack.contains("Resturants"));
    }

    #[test]
    fn test_navigate_to_details_replaces_params() {
        let mut stack = NavigationStack::new();
        stack.push(Route::Restaurants);
        stack.push(Route::Details {
            restaurant: sample_restaurant(),
        });
        let other = Restaurant::new("Kinoya", "https://example.com/kinoya.jpg");

        stack.navigate(Route::Details {
            restaurant: other.clone(),
        });

        assert_eq!(stack.breadcrumbs().len(), 3);
        assert_eq!(stack.current().restaurant(), Some(&other));
    }

    #[test]
    fn test_breadcrumbs() {
        let mut stack = NavigationStack::new();
        stack.push(Route::Restaurants);
        stack.push(Route::Details {
            restaurant: sample_restaurant(),
        });

        assert_eq!(
            stack.breadcrumbs(),
            vec!["Home".to_string(), "Restaurants".to_string(), "Orfali Bros".to_string()]
        );
    }
}
