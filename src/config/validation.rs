use regex::Regex;
use std::sync::OnceLock;

static ENV_REFERENCE: OnceLock<Regex> = OnceLock::new();

/// Expand `${VAR_NAME}` references through `lookup`. Unset variables are
/// left as written.
pub fn expand_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let re = ENV_REFERENCE
        .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static env pattern is valid"));

    re.replace_all(value, |cap: &regex::Captures| {
        lookup(&cap[1]).unwrap_or_else(|| cap[0].to_string())
    })
    .into_owned()
}

/// `~/` prefix to the home directory.
pub fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}
