//! Page rendering.
//!
//! # Responsibilities
//! - Own the template environment for the four documents this service serves
//! - Render each route's body atomically in one call
//!
//! # Design Decisions
//! - Templates are embedded with include_str! so the binary is self-contained
//! - Dynamic values pass through the engine's HTML auto-escaping; nothing
//!   is spliced into markup by string substitution
//! - The environment is built once at startup, so a broken template is a
//!   boot failure instead of a request-time 500

use minijinja::{context, Environment};

/// Error produced when a template fails to parse or render.
pub type RenderError = minijinja::Error;

/// Renderer for the tracker's pages.
///
/// Holds the parsed templates and the application display name, which is
/// the one value every page interpolates.
pub struct Pages {
    env: Environment<'static>,
    app_name: String,
}

impl Pages {
    /// Build the template environment for the given display name.
    pub fn new(app_name: &str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../templates/base.html"))?;
        env.add_template("home.html", include_str!("../../templates/home.html"))?;
        env.add_template("count.html", include_str!("../../templates/count.html"))?;
        env.add_template("about.html", include_str!("../../templates/about.html"))?;
        env.add_template(
            "store_down.html",
            include_str!("../../templates/store_down.html"),
        )?;
        Ok(Self {
            env,
            app_name: app_name.to_string(),
        })
    }

    /// The landing page. Static content.
    pub fn home(&self) -> Result<String, RenderError> {
        let tmpl = self.env.get_template("home.html")?;
        tmpl.render(context! {
            app_name => &self.app_name,
            page => "Home",
        })
    }

    /// The counter page, embedding the fresh count and one quote.
    pub fn count(&self, count: u64, quote: &str) -> Result<String, RenderError> {
        let tmpl = self.env.get_template("count.html")?;
        tmpl.render(context! {
            app_name => &self.app_name,
            page => "Count",
            count => count,
            quote => quote,
        })
    }

    /// The about page. Static content.
    pub fn about(&self) -> Result<String, RenderError> {
        let tmpl = self.env.get_template("about.html")?;
        tmpl.render(context! {
            app_name => &self.app_name,
            page => "About",
        })
    }

    /// Degraded counter page shown when the store is unreachable.
    /// Deliberately contains no count value at all.
    pub fn store_down(&self) -> Result<String, RenderError> {
        let tmpl = self.env.get_template("store_down.html")?;
        tmpl.render(context! {
            app_name => &self.app_name,
            page => "Count",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QUOTES;

    fn pages() -> Pages {
        Pages::new("Khalid Tracker").unwrap()
    }

    #[test]
    fn test_home_renders_static_content() {
        let html = pages().home().unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Khalid Tracker · Home</title>"));
        assert!(html.contains("Welcome to Khalid Tracker"));
        assert!(html.contains("View Live Count"));
    }

    #[test]
    fn test_count_embeds_value_and_quote() {
        let html = pages().count(42, QUOTES[1]).unwrap();
        assert!(html.contains("<title>Khalid Tracker · Count</title>"));
        assert!(html.contains("This page has been visited 42 times."));
        assert!(html.contains(QUOTES[1]));
    }

    #[test]
    fn test_about_renders_static_content() {
        let html = pages().about().unwrap();
        assert!(html.contains("<title>Khalid Tracker · About</title>"));
        assert!(html.contains("About This Project"));
    }

    #[test]
    fn test_store_down_shows_no_count() {
        let html = pages().store_down().unwrap();
        assert!(html.contains("temporarily unavailable"));
        assert!(!html.contains("has been visited"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let p = pages();
        assert_eq!(p.home().unwrap(), p.home().unwrap());
        assert_eq!(p.about().unwrap(), p.about().unwrap());
    }

    #[test]
    fn test_display_name_is_escaped() {
        let p = Pages::new("<script>alert(1)</script>").unwrap();
        let html = p.home().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
