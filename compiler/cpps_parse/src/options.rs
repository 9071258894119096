/// Parser configuration.
///
/// # Example
///
/// ```
/// use cpps_parse::ParseOptions;
///
/// // Every diagnosis the grammar encounters, including follow-on reports.
/// let options = ParseOptions::verbatim();
/// assert!(!options.filter_follow_on);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseOptions {
    /// Drop a wrapping production's generic diagnosis when an inner
    /// production already reported an error for the same failure.
    pub filter_follow_on: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            filter_follow_on: true,
        }
    }
}

impl ParseOptions {
    /// Report every diagnosis, including follow-on ones.
    pub fn verbatim() -> Self {
        ParseOptions {
            filter_follow_on: false,
        }
    }
}
