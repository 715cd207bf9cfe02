//! Sequence-numbered identifiers (`i001`, `c042`, ...).
//!
//! A [`Sequence`] hands out `prefix + zero-padded counter` and never goes
//! backwards: observing an existing ID only ever raises the counter. Once
//! the counter passes `u64::MAX` the sequence is exhausted and hands out
//! nothing, so an ID is never issued twice.

pub const IMAGE_ID_PREFIX: char = 'i';
pub const CONTAINER_ID_PREFIX: char = 'c';

const ID_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    prefix: char,
    // None once exhausted
    next: Option<u64>,
}

impl Sequence {
    pub fn new(prefix: char) -> Self {
        Self {
            prefix,
            next: Some(1),
        }
    }

    /// Raises the counter past `id` if it carries this prefix and a larger number.
    pub fn observe(&mut self, id: &str) {
        let Some(n) = parse_sequence(self.prefix, id) else {
            return;
        };
        if self.next.is_some_and(|next| n >= next) {
            self.next = n.checked_add(1);
        }
    }

    /// The next ID, or `None` when every number has been used.
    pub fn allocate(&mut self) -> Option<String> {
        let n = self.next?;
        self.next = n.checked_add(1);
        Some(format_id(self.prefix, n))
    }
}

pub fn format_id(prefix: char, n: u64) -> String {
    format!("{}{:0width$}", prefix, n, width = ID_WIDTH)
}

/// Extracts the numeric part of `id`: the digits directly after `prefix`.
/// Trailing non-digit text is ignored, so `c12-old` yields 12.
pub fn parse_sequence(prefix: char, id: &str) -> Option<u64> {
    let rest = id.strip_prefix(prefix)?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_three_digit_padding() {
        assert_eq!(format_id('i', 3), "i003");
        assert_eq!(format_id('c', 1234), "c1234");
    }

    #[test]
    fn parses_suffix() {
        assert_eq!(parse_sequence('i', "i007"), Some(7));
        assert_eq!(parse_sequence('c', "c12-old"), Some(12));
        assert_eq!(parse_sequence('c', "i007"), None);
        assert_eq!(parse_sequence('c', "c"), None);
        assert_eq!(parse_sequence('c', "cx1"), None);
    }

    #[test]
    fn observe_never_lowers_counter() {
        let mut seq = Sequence::new('i');
        seq.observe("i005");
        seq.observe("i002");
        seq.observe("garbage");
        assert_eq!(seq.allocate().as_deref(), Some("i006"));
        assert_eq!(seq.allocate().as_deref(), Some("i007"));
    }

    #[test]
    fn fresh_sequence_starts_at_one() {
        let mut seq = Sequence::new('c');
        assert_eq!(seq.allocate().as_deref(), Some("c001"));
    }

    #[test]
    fn largest_id_exhausts_the_sequence() {
        let mut seq = Sequence::new('i');
        seq.observe(&format!("i{}", u64::MAX));
        assert_eq!(seq.allocate(), None);

        // a smaller ID cannot revive it
        seq.observe("i004");
        assert_eq!(seq.allocate(), None);
    }

    #[test]
    fn last_number_is_handed_out_once() {
        let mut seq = Sequence::new('c');
        seq.observe(&format!("c{}", u64::MAX - 1));
        assert_eq!(seq.allocate(), Some(format!("c{}", u64::MAX)));
        assert_eq!(seq.allocate(), None);
    }
}
