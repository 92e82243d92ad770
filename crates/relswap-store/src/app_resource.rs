//! Application resource files
//!
//! `ebin/<app>.app` holds a single form:
//! `{application, Name, [{vsn, "X"}, {modules, [...]}, ...]}.`

#![allow(clippy::result_large_err)]

use crate::errors::{term_parse, Result};
use crate::term::{parse_term, Term};

/// The parts of a resource file the planner reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppResource {
    pub name: String,
    pub vsn: Option<String>,
    /// Units the application declares, in file order
    pub modules: Vec<String>,
}

/// Parse the contents of a resource file.
///
/// # Errors
///
/// `ArtifactRead` if the text is not a single `{application, Name, Props}` form.
pub fn parse_app_resource(src: &str) -> Result<AppResource> {
    let term = parse_term(src)?;
    let Some([tag, name, props]) = term.as_tuple() else {
        return Err(term_parse(0, "expected {application, Name, Properties}"));
    };
    if tag.as_atom() != Some("application") {
        return Err(term_parse(0, "first element must be the atom application"));
    }
    let name = name
        .as_atom()
        .ok_or_else(|| term_parse(0, "application name must be an atom"))?;
    if props.as_list().is_none() {
        return Err(term_parse(0, "application properties must be a list"));
    }

    let vsn = props.property("vsn").and_then(Term::as_str).map(str::to_string);
    let modules = props
        .property("modules")
        .and_then(Term::as_list)
        .map(|items| {
            items
                .iter()
                .filter_map(Term::as_atom)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(AppResource {
        name: name.to_string(),
        vsn,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        let resource = parse_app_resource(
            "{application, shop, [{vsn, \"1.4.0\"}, {modules, [cart, checkout]}]}.\n",
        )
        .unwrap();

        assert_eq!(resource.name, "shop");
        assert_eq!(resource.vsn.as_deref(), Some("1.4.0"));
        assert_eq!(resource.modules, vec!["cart", "checkout"]);
    }

    #[test]
    fn test_missing_vsn() {
        let resource = parse_app_resource("{application, shop, []}.").unwrap();
        assert_eq!(resource.vsn, None);
    }

    #[test]
    fn test_wrong_shape() {
        assert!(parse_app_resource("{library, shop, []}.").is_err());
        assert!(parse_app_resource("{application, shop}.").is_err());
        assert!(parse_app_resource("{application, \"shop\", []}.").is_err());
    }
}
