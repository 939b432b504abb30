//! Template store and view renderer.
//!
//! Templates are compiled into the binary and registered once at startup;
//! the registry is read-only afterwards and shared across requests.

use handlebars::Handlebars;
use hoersaal_core::resolve::{LECTURE_NOT_FOUND_VIEW, LECTURE_VIEW};
use serde::Serialize;

use crate::error::{Error, Result};

pub const INDEX_VIEW: &str = "index";
pub const SEARCH_VIEW: &str = "search";
pub const ABOUT_VIEW: &str = "about";

const PARTIALS: &[(&str, &str)] =
  &[("layout", include_str!("../templates/partials/layout.hbs"))];

const TEMPLATES: &[(&str, &str)] = &[
  (LECTURE_VIEW, include_str!("../templates/lecture.hbs")),
  (LECTURE_NOT_FOUND_VIEW, include_str!("../templates/lecture-not-found.hbs")),
  (INDEX_VIEW, include_str!("../templates/index.hbs")),
  (SEARCH_VIEW, include_str!("../templates/search.hbs")),
  (ABOUT_VIEW, include_str!("../templates/about.hbs")),
];

/// Named, pre-compiled view templates.
pub struct Views {
  registry: Handlebars<'static>,
}

impl Views {
  /// The templates shipped with the server.
  pub fn builtin() -> Result<Self> { Self::from_sources(PARTIALS, TEMPLATES) }

  /// Build a registry from `(name, source)` pairs. Fails on the first
  /// template that does not compile.
  pub fn from_sources(
    partials: &[(&str, &str)],
    templates: &[(&str, &str)],
  ) -> Result<Self> {
    let mut registry = Handlebars::new();
    for (name, source) in partials {
      registry.register_partial(name, *source)?;
    }
    for (name, source) in templates {
      registry.register_template_string(name, *source)?;
    }
    Ok(Self { registry })
  }

  pub fn contains(&self, view: &str) -> bool { self.registry.has_template(view) }

  /// Render `model` with the template registered as `view`.
  pub fn render<T: Serialize>(&self, view: &str, model: &T) -> Result<String> {
    if !self.contains(view) {
      return Err(Error::TemplateMissing(view.to_owned()));
    }
    Ok(self.registry.render(view, model)?)
  }
}
