//! Path templates with `:name` parameter segments.
//!
//! A template is a `/`-separated list of segments. A segment is a parameter
//! marker when it is exactly `:` followed by a name: an ASCII letter or `_`,
//! then ASCII letters, digits, `_` or `-` (so `:siteId`, `:site_id` and
//! `:site-id` are all markers). Every other segment, including malformed
//! markers such as `:`, `:1st`, `:-x`, `:a:b` or `:id.json`, is a literal and
//! stays verbatim in the interpolated path.

use std::fmt;

use crate::{Error, PathParams, PathValue, Result};

/// Character that introduces a parameter marker.
pub const PARAM_PREFIX: char = ':';

/// A single template segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Static text, matched verbatim.
    Literal(String),
    /// Named parameter, substituted at interpolation.
    Param(String),
}

/// A parsed path template, e.g. `/sites/:siteId/pages/:page`.
///
/// ```
/// use reqcodec_core::{PathTemplate, PathValue};
///
/// let template = PathTemplate::parse("/sites/:siteId/pages/:page");
/// assert_eq!(template.parameters(), ["siteId", "page"]);
/// assert_eq!(
///     template.interpolate([
///         ("siteId", PathValue::from(5)),
///         ("page", PathValue::from("home")),
///     ]),
///     "/sites/5/pages/home"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
    parameters: Vec<String>,
}

impl PathTemplate {
    /// Parse a template. Parsing never fails; malformed markers become literals.
    #[must_use]
    pub fn parse(template: impl Into<String>) -> Self {
        let raw = template.into();
        let segments: Vec<Segment> = raw.split('/').map(parse_segment).collect();

        let mut parameters: Vec<String> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment
                && !parameters.contains(name)
            {
                parameters.push(name.clone());
            }
        }

        Self {
            raw,
            segments,
            parameters,
        }
    }

    /// The template as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments, separators excluded.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Required parameter names, left to right, without duplicates.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// `true` if the template has no parameter markers.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Substitute values into the template.
    ///
    /// Each pair replaces the first marker for its name that has not been
    /// replaced yet, in the pairs' order. Names with no marker are ignored.
    /// A marker with no matching pair is left as `:name` in the output.
    pub fn interpolate<K, I>(&self, params: I) -> String
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, PathValue)>,
    {
        let mut rendered: Vec<Option<String>> = vec![None; self.segments.len()];

        for (name, value) in params {
            let name = name.as_ref();
            let slot = self
                .segments
                .iter()
                .zip(rendered.iter_mut())
                .find(|(segment, done)| {
                    done.is_none() && matches!(segment, Segment::Param(param) if param == name)
                })
                .map(|(_, done)| done);
            if let Some(slot) = slot {
                *slot = Some(value.to_string());
            }
        }

        let mut path = String::with_capacity(self.raw.len());
        for (index, (segment, value)) in self.segments.iter().zip(rendered).enumerate() {
            if index > 0 {
                path.push('/');
            }
            match (segment, value) {
                (_, Some(value)) => path.push_str(&value),
                (Segment::Literal(text), None) => path.push_str(text),
                (Segment::Param(name), None) => {
                    path.push(PARAM_PREFIX);
                    path.push_str(name);
                }
            }
        }
        path
    }

    /// Interpolate any [`PathParams`] source.
    pub fn render<P: PathParams>(&self, params: &P) -> String {
        self.interpolate(params.path_pairs())
    }

    /// Check a concrete path against this template.
    ///
    /// Literal segments must match exactly; parameter segments match any
    /// single segment. A value containing `/` therefore never matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = path.split('/');
        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            if let Segment::Literal(text) = segment
                && text != part
            {
                return false;
            }
        }
        parts.next().is_none()
    }

    /// Require `names` to be exactly this template's parameter set.
    pub fn check_params(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<String> = self
            .parameters
            .iter()
            .filter(|param| !names.contains(&param.as_str()))
            .cloned()
            .collect();

        let mut unexpected: Vec<String> = Vec::new();
        for name in names {
            if !self.parameters.iter().any(|param| param == name)
                && !unexpected.iter().any(|seen| seen == name)
            {
                unexpected.push((*name).to_string());
            }
        }

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(Error::ParamMismatch {
                template: self.raw.clone(),
                missing,
                unexpected,
            })
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

impl From<String> for PathTemplate {
    fn from(template: String) -> Self {
        Self::parse(template)
    }
}

/// Substitute `params` into a template string.
///
/// Shorthand for [`PathTemplate::parse`] followed by
/// [`PathTemplate::render`].
///
/// ```
/// use reqcodec_core::{ParamMap, interpolate};
///
/// let params = ParamMap::new().with("siteId", 5);
/// assert_eq!(interpolate("/sites/:siteId", &params), "/sites/5");
/// ```
pub fn interpolate<P: PathParams>(template: &str, params: &P) -> String {
    PathTemplate::parse(template).render(params)
}

fn parse_segment(segment: &str) -> Segment {
    match segment.strip_prefix(PARAM_PREFIX) {
        Some(name) if is_param_name(name) => Segment::Param(name.to_string()),
        _ => Segment::Literal(segment.to_string()),
    }
}

fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamMap;

    #[test]
    fn no_markers_means_no_parameters() {
        let template = PathTemplate::parse("/health/live");
        assert!(template.is_static());
        assert!(template.parameters().is_empty());
        assert_eq!(template.interpolate(ParamMap::new().path_pairs()), "/health/live");
    }

    #[test]
    fn parameters_in_order_and_deduplicated() {
        let template = PathTemplate::parse("/a/:first/b/:second/:first");
        assert_eq!(template.parameters(), ["first", "second"]);
    }

    #[test]
    fn sites_scenario() {
        let params = ParamMap::new().with("siteId", 5);
        assert_eq!(interpolate("/sites/:siteId", &params), "/sites/5");
    }

    #[test]
    fn malformed_markers_are_literals() {
        let template = PathTemplate::parse("/x/:/:9lives/:a:b/:id.json/:ok");
        assert_eq!(template.parameters(), ["ok"]);
        assert_eq!(
            template.segments().get(2),
            Some(&Segment::Literal(":".to_string()))
        );

        let params = ParamMap::new()
            .with("a", "A")
            .with("id", 1)
            .with("ok", "yes");
        assert_eq!(
            template.render(&params),
            "/x/:/:9lives/:a:b/:id.json/yes"
        );
    }

    #[test]
    fn kebab_and_screaming_names_are_markers() {
        let template = PathTemplate::parse("/orgs/:org-name/:API-VERSION/:-x/:x-");
        assert_eq!(template.parameters(), ["org-name", "API-VERSION", "x-"]);
        assert!(template.check_params(&["org-name", "API-VERSION", "x-"]).is_ok());

        let params = ParamMap::new()
            .with("org-name", "acme")
            .with("API-VERSION", 2)
            .with("x-", "end");
        assert_eq!(template.render(&params), "/orgs/acme/2/:-x/end");
    }

    #[test]
    fn missing_parameter_leaves_marker_in_place() {
        // Known limitation: a dynamic map that omits a name is not an error.
        let params = ParamMap::new().with("owner", "rust-lang");
        assert_eq!(
            interpolate("/repos/:owner/:repo", &params),
            "/repos/rust-lang/:repo"
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = ParamMap::new().with("id", 3).with("extra", "nope");
        assert_eq!(interpolate("/items/:id", &params), "/items/3");
    }

    #[test]
    fn repeated_marker_replaces_first_occurrence_only() {
        let params = ParamMap::new().with("id", 1);
        assert_eq!(interpolate("/:id/copy/:id", &params), "/1/copy/:id");
    }

    #[test]
    fn marker_prefix_text_is_not_rewritten() {
        let params = ParamMap::new().with("id", 1).with("identifier", 2);
        assert_eq!(
            interpolate("/a/:identifier/:id", &params),
            "/a/2/1"
        );
    }

    #[test]
    fn substitution_is_independent_of_map_order() {
        let forward = ParamMap::new().with("a", 1).with("b", 2);
        let backward = ParamMap::new().with("b", 2).with("a", 1);
        assert_eq!(
            interpolate("/:a/x/:b", &forward),
            interpolate("/:a/x/:b", &backward)
        );
    }

    #[test]
    fn interpolated_path_matches_template() {
        let template = PathTemplate::parse("/orgs/:org/teams/:team/members");
        let cases = [
            ParamMap::new().with("org", "acme").with("team", 7),
            ParamMap::new().with("team", "core").with("org", 0.5),
            ParamMap::new().with("org", "").with("team", -1),
        ];
        for params in &cases {
            let path = template.render(params);
            assert!(template.matches(&path), "{path} should match {template}");
        }
    }

    #[test]
    fn matches_rejects_other_shapes() {
        let template = PathTemplate::parse("/sites/:siteId");
        assert!(template.matches("/sites/5"));
        assert!(!template.matches("/pages/5"));
        assert!(!template.matches("/sites/5/extra"));
        assert!(!template.matches("/sites"));
    }

    #[test]
    fn check_params_reports_missing_and_unexpected() {
        let template = PathTemplate::parse("/repos/:owner/:repo");
        assert!(template.check_params(&["repo", "owner"]).is_ok());

        match template.check_params(&["owner", "name"]) {
            Err(Error::ParamMismatch {
                missing,
                unexpected,
                ..
            }) => {
                assert_eq!(missing, ["repo"]);
                assert_eq!(unexpected, ["name"]);
            }
            other => panic!("expected ParamMismatch, got {other:?}"),
        }
    }
}
