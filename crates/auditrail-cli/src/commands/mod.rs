pub mod changelog;
pub mod feature;
pub mod threshold_set;

use auditrail_engine::Attribution;
use clap::Args;

/// Flags recorded alongside every mutation
#[derive(Debug, Args)]
pub struct AttributionArgs {
    /// Who is making the change (defaults to "system")
    #[arg(long, env = "AUDITRAIL_ACTOR")]
    pub changed_by: Option<String>,

    /// Free-text reason stored with each change
    #[arg(long)]
    pub comment: Option<String>,
}

impl From<AttributionArgs> for Attribution {
    fn from(args: AttributionArgs) -> Self {
        Attribution::new(args.changed_by, args.comment)
    }
}

/// Value of an optional column after a partial modify: the flag if given,
/// nothing if cleared, otherwise the current value
pub fn overlay<T>(given: Option<T>, clear: bool, current: Option<T>) -> Option<T> {
    if clear {
        None
    } else {
        given.or(current)
    }
}

/// Print a serializable value as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render an optional text column
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_prefers_given_then_current() {
        assert_eq!(overlay(Some("new"), false, Some("old")), Some("new"));
        assert_eq!(overlay(None, false, Some("old")), Some("old"));
        assert_eq!(overlay(None::<&str>, true, Some("old")), None);
    }
}
