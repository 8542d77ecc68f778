/// First lines at least this long (in characters) are withheld behind an
/// explicit "render anyway". Minified assets are the usual culprit.
pub const LINE_LENGTH_FOR_WARNING: usize = 200_000;

/// True when neither side's first line is long enough to warrant a warning.
pub fn is_safe_to_render(before_lines: &[String], after_lines: &[String]) -> bool {
    let first_len = |lines: &[String]| lines.first().map_or(0, |l| l.chars().count());
    first_len(before_lines).max(first_len(after_lines)) < LINE_LENGTH_FOR_WARNING
}

/// Render permission for the text pair currently on screen.
///
/// The bypass is bound to the identity of the texts it was granted for, so
/// moving to another pair re-arms the gate.
#[derive(Debug, Clone, Default)]
pub struct SafetyGate {
    texts_key: Option<u64>,
    safe: bool,
    bypassed: bool,
}

impl SafetyGate {
    /// Re-evaluate the gate for a (possibly new) text pair.
    pub fn inspect(&mut self, texts_key: u64, before_lines: &[String], after_lines: &[String]) {
        if self.texts_key != Some(texts_key) {
            self.bypassed = false;
            self.texts_key = Some(texts_key);
        }
        self.safe = is_safe_to_render(before_lines, after_lines);
    }

    pub fn bypass(&mut self) {
        self.bypassed = true;
    }

    pub fn allows_render(&self) -> bool {
        self.safe || self.bypassed
    }

    /// True when the interstitial should be on screen.
    pub fn is_armed(&self) -> bool {
        !self.allows_render()
    }
}
