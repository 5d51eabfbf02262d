use crate::logger;
use crate::models::ProcessingResult;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Input,
    Results,
    History,
    Demo,
    About,
    Login,
    Signup,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Home",
            Page::Input => "Input",
            Page::Results => "Results",
            Page::History => "History",
            Page::Demo => "Demo",
            Page::About => "About",
            Page::Login => "Login",
            Page::Signup => "Sign Up",
        }
    }
}

/// A requested page transition. Only `Results` may carry a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Landing,
    Input,
    Results(Option<Arc<ProcessingResult>>),
    History,
    Demo,
    About,
    Login,
    Signup,
}

impl Route {
    pub fn results(result: ProcessingResult) -> Self {
        Route::Results(Some(Arc::new(result)))
    }

    pub fn page(&self) -> Page {
        match self {
            Route::Landing => Page::Landing,
            Route::Input => Page::Input,
            Route::Results(_) => Page::Results,
            Route::History => Page::History,
            Route::Demo => Page::Demo,
            Route::About => Page::About,
            Route::Login => Page::Login,
            Route::Signup => Page::Signup,
        }
    }
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Landing => Route::Landing,
            Page::Input => Route::Input,
            Page::Results => Route::Results(None),
            Page::History => Route::History,
            Page::Demo => Route::Demo,
            Page::About => Route::About,
            Page::Login => Route::Login,
            Page::Signup => Route::Signup,
        }
    }
}

/// Current page plus the last results payload. There is no history stack and
/// no guard layer: destination views redirect themselves when they cannot
/// render.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Page,
    results: Option<Arc<ProcessingResult>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Page::Landing,
            results: None,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, route: impl Into<Route>) {
        let route = route.into();
        let page = route.page();
        if let Route::Results(Some(payload)) = route {
            self.results = Some(payload);
        }
        if page != self.current {
            logger::log(&format!("Navigate {:?} -> {:?}", self.current, page));
        }
        self.current = page;
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn results(&self) -> Option<&Arc<ProcessingResult>> {
        self.results.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result;

    #[test]
    fn test_starts_on_landing_without_payload() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Page::Landing);
        assert!(nav.results().is_none());
    }

    #[test]
    fn test_payload_survives_round_trip() {
        let mut nav = Navigator::new();
        let payload = Arc::new(sample_result());

        nav.navigate(Route::Results(Some(payload.clone())));
        nav.navigate(Route::About);
        nav.navigate(Route::Results(None));

        assert_eq!(nav.current(), Page::Results);
        assert!(Arc::ptr_eq(nav.results().unwrap(), &payload));
    }

    #[test]
    fn test_new_payload_replaces_old() {
        let mut nav = Navigator::new();
        nav.navigate(Route::results(sample_result()));

        let mut second = sample_result();
        second.summary = "Second".to_string();
        nav.navigate(Route::results(second));

        assert_eq!(nav.results().unwrap().summary, "Second");
    }

    #[test]
    fn test_plain_pages_convert_to_routes() {
        let mut nav = Navigator::new();
        nav.navigate(Page::History);
        assert_eq!(nav.current(), Page::History);
        assert_eq!(Route::from(Page::Results), Route::Results(None));
    }
}
