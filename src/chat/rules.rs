//! Ordered keyword rules mapping user input to an intent.

/// What the user seems to want. Rules are tried in `RULES` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Exit,
    Help,
    Greeting,
    HowAreYou,
    Joke,
    Weather,
    Time,
    Quote,
    ColorChange,
    Thanks,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Whole trimmed input equals one of the keywords.
    Exact,
    /// Any keyword occurs in the input: single words as the start of a word
    /// ("jokes", "laughing"), multi-word phrases as substrings.
    Contains,
}

#[derive(Debug)]
pub struct Rule {
    pub intent: Intent,
    pub matching: Match,
    pub keywords: &'static [&'static str],
}

pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Exit,
        matching: Match::Exact,
        keywords: &["bye", "goodbye", "exit", "quit"],
    },
    Rule {
        intent: Intent::Help,
        matching: Match::Exact,
        keywords: &["help"],
    },
    Rule {
        intent: Intent::Greeting,
        matching: Match::Contains,
        keywords: &["hello", "hi", "hey", "greetings"],
    },
    Rule {
        intent: Intent::HowAreYou,
        matching: Match::Contains,
        keywords: &["how are you", "what's up", "how's it going"],
    },
    Rule {
        intent: Intent::Joke,
        matching: Match::Contains,
        keywords: &["joke", "funny", "laugh"],
    },
    Rule {
        intent: Intent::Weather,
        matching: Match::Contains,
        keywords: &["weather", "temperature", "forecast"],
    },
    Rule {
        intent: Intent::Time,
        matching: Match::Contains,
        keywords: &["time", "clock", "hour"],
    },
    Rule {
        intent: Intent::Quote,
        matching: Match::Contains,
        keywords: &["quote", "inspire", "motivation"],
    },
    Rule {
        intent: Intent::ColorChange,
        matching: Match::Contains,
        keywords: &["color", "theme", "change color"],
    },
    Rule {
        intent: Intent::Thanks,
        matching: Match::Contains,
        keywords: &["thank", "thanks", "appreciate"],
    },
];

/// Lowercase words of `input`; apostrophes stay inside words ("what's").
fn words(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect()
}

impl Rule {
    fn matches(&self, lower: &str, words: &[&str]) -> bool {
        match self.matching {
            Match::Exact => self.keywords.iter().any(|kw| *kw == lower),
            Match::Contains => self.keywords.iter().any(|kw| {
                if kw.contains(' ') {
                    lower.contains(kw)
                } else {
                    words.iter().any(|w| w.starts_with(kw))
                }
            }),
        }
    }
}

/// First matching intent for `input`, or `Fallback`.
pub fn classify(input: &str) -> Intent {
    let lower = input.trim().to_lowercase();
    let words = words(&lower);
    RULES
        .iter()
        .find(|rule| rule.matches(&lower, &words))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_exact_only() {
        assert_eq!(classify("  BYE "), Intent::Exit);
        assert_eq!(classify("quit"), Intent::Exit);
        assert_eq!(classify("bye for now"), Intent::Fallback);
    }

    #[test]
    fn greeting_must_start_a_word() {
        assert_eq!(classify("hi there"), Intent::Greeting);
        assert_eq!(classify("this is nothing"), Intent::Fallback);
        assert_eq!(classify("Hey, what's the time?"), Intent::Greeting);
    }

    #[test]
    fn inflected_keywords_still_match() {
        assert_eq!(classify("tell me some jokes"), Intent::Joke);
        assert_eq!(classify("any inspirational quotes?"), Intent::Quote);
        assert_eq!(classify("I'm laughing"), Intent::Joke);
        assert_eq!(classify("what times is it"), Intent::Time);
        assert_eq!(classify("change the colors"), Intent::ColorChange);
    }

    #[test]
    fn phrases_match_as_substrings() {
        assert_eq!(classify("so how are you today"), Intent::HowAreYou);
        assert_eq!(classify("what's up"), Intent::HowAreYou);
    }

    #[test]
    fn priority_order_is_respected() {
        // joke beats weather, weather beats time
        assert_eq!(classify("a funny forecast"), Intent::Joke);
        assert_eq!(classify("weather at this hour"), Intent::Weather);
        assert_eq!(classify("please change color"), Intent::ColorChange);
        assert_eq!(classify("thanks a lot"), Intent::Thanks);
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("help me"), Intent::Fallback);
    }
}
