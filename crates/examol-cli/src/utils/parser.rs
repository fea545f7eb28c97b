use examol::store::recipe::SimpleRecipe;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid recipe format for '{0}'. Expected 'name@level' (e.g., 'ip@xtb-vertical').")]
    InvalidRecipeFormat(String),

    #[error("Component '{component}' cannot be empty in recipe '{name}'.")]
    EmptyComponent {
        component: &'static str,
        name: String,
    },
}

pub fn parse_recipe(s: &str) -> Result<SimpleRecipe, ParseError> {
    let (name, level) = s
        .split_once('@')
        .ok_or_else(|| ParseError::InvalidRecipeFormat(s.to_string()))?;

    if name.trim().is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "name",
            name: s.to_string(),
        });
    }
    if level.trim().is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "level",
            name: s.to_string(),
        });
    }
    Ok(SimpleRecipe::new(name.trim(), level.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_level() {
        assert_eq!(
            parse_recipe("ip@xtb-vertical"),
            Ok(SimpleRecipe::new("ip", "xtb-vertical"))
        );
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            parse_recipe("ip"),
            Err(ParseError::InvalidRecipeFormat("ip".to_string()))
        );
    }

    #[test]
    fn rejects_empty_components() {
        assert!(matches!(
            parse_recipe("@xtb"),
            Err(ParseError::EmptyComponent { component: "name", .. })
        ));
        assert!(matches!(
            parse_recipe("ip@ "),
            Err(ParseError::EmptyComponent { component: "level", .. })
        ));
    }
}
