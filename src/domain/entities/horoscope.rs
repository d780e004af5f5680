use super::ZodiacSign;

/// A daily reading as returned by the horoscope API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoroscopeResult {
    pub date: String,
    pub text: String,
}

impl HoroscopeResult {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }

    /// Markdown body of the reply
    pub fn render(&self, sign: ZodiacSign) -> String {
        format!("*Horoscope details for {}, {}*: {}", sign, self.date, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let result = HoroscopeResult::new("Jun 15, 2024", "A good day for naps.");
        assert_eq!(
            result.render(ZodiacSign::Leo),
            "*Horoscope details for Leo, Jun 15, 2024*: A good day for naps."
        );
    }
}
