pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Order quantity, always within `MIN_QUANTITY..=MAX_QUANTITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn adjust(self, delta: i32) -> Self {
        Self::new(i64::from(self.0) + i64::from(delta))
    }

    /// Read a quantity typed into the order form.
    ///
    /// Leading integer digits are honoured (`"3 jars"` is 3); anything without
    /// them counts as the minimum.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Self::default();
        }

        let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(MIN_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_saturates_at_bounds() {
        let q = Quantity::default();
        assert_eq!(q.adjust(-5).get(), 1);
        assert_eq!(q.adjust(3).get(), 4);
        assert_eq!(q.adjust(i32::MAX).get(), 10);
        assert_eq!(Quantity::new(10).adjust(i32::MIN).get(), 1);
    }

    #[test]
    fn parse_reads_leading_integer() {
        assert_eq!(Quantity::parse("3").get(), 3);
        assert_eq!(Quantity::parse("  7 jars").get(), 7);
        assert_eq!(Quantity::parse("42").get(), 10);
        assert_eq!(Quantity::parse("-4").get(), 1);
        assert_eq!(Quantity::parse("0").get(), 1);
        assert_eq!(Quantity::parse("abc").get(), 1);
        assert_eq!(Quantity::parse("").get(), 1);
        assert_eq!(Quantity::parse("99999999999999999999999").get(), 10);
    }
}
