//! Intent resolution using an ordered keyword rule table.
//!
//! Every rule whose pattern occurs anywhere in the normalized text overrides the
//! intent chosen so far, so the LAST matching rule in declaration order wins.
//! Matching is plain substring containment: no word boundaries, no scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word users address the bot with.
pub const ACTIVATION_WORD: &str = "yuri";

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// "your master": show the master's profile
    Master,
    Food,
    QuestionWhy,
    /// "bye": farewell pool, or leave when in a room
    Farewell,
    WhyNot,
    Sex,
    Video,
    QuestionMe,
    QuestionYou,
    Lurking,
    Love,
    DontCare,
    ThanksYuri,
    Laughter,
    /// "yuri weather <city>"
    WeatherSearch,
    Work,
    LoveConfession,
    /// "bye yuri": leave the conversation
    Leave,
    /// "yuri youtube <keywords>"
    VideoSearch,
    /// "yuri advice <topic>"
    AdviceSearch,
    Stop,
    Liar,
    Hello,
    IKnow,
    HowAreYou,
    WhatAreYou,
    Again,
    // Literal commands, matched only when they are the whole message.
    VideoHelp,
    WeatherHelp,
    AdviceHelp,
    NameCall,
    Ok,
    Yes,
    No,
    WeatherCardDemo,
    TestCommand,
    /// Nothing matched
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a stable label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Master => "master",
            Intent::Food => "food",
            Intent::QuestionWhy => "question_why",
            Intent::Farewell => "farewell",
            Intent::WhyNot => "why_not",
            Intent::Sex => "sex",
            Intent::Video => "video",
            Intent::QuestionMe => "question_me",
            Intent::QuestionYou => "question_you",
            Intent::Lurking => "lurking",
            Intent::Love => "love",
            Intent::DontCare => "dont_care",
            Intent::ThanksYuri => "thanks_yuri",
            Intent::Laughter => "laughter",
            Intent::WeatherSearch => "weather_search",
            Intent::Work => "work",
            Intent::LoveConfession => "love_confession",
            Intent::Leave => "leave",
            Intent::VideoSearch => "video_search",
            Intent::AdviceSearch => "advice_search",
            Intent::Stop => "stop",
            Intent::Liar => "liar",
            Intent::Hello => "hello",
            Intent::IKnow => "i_know",
            Intent::HowAreYou => "how_are_you",
            Intent::WhatAreYou => "what_are_you",
            Intent::Again => "again",
            Intent::VideoHelp => "video_help",
            Intent::WeatherHelp => "weather_help",
            Intent::AdviceHelp => "advice_help",
            Intent::NameCall => "name_call",
            Intent::Ok => "ok",
            Intent::Yes => "yes",
            Intent::No => "no",
            Intent::WeatherCardDemo => "weather_card_demo",
            Intent::TestCommand => "test_command",
            Intent::Unknown => "unknown",
        }
    }

    /// Intents answered by the dispatcher's side-effect handlers instead of a
    /// canned reply pool.
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Intent::Master
                | Intent::Leave
                | Intent::VideoSearch
                | Intent::WeatherSearch
                | Intent::AdviceSearch
                | Intent::WeatherCardDemo
        )
    }
}

/// A single `(pattern, intent)` pair of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub pattern: &'static str,
    pub intent: Intent,
}

impl KeywordRule {
    pub const fn new(pattern: &'static str, intent: Intent) -> Self {
        Self { pattern, intent }
    }
}

/// The built-in rules. Order matters: later entries override earlier ones.
pub const DEFAULT_RULES: &[KeywordRule] = &[
    KeywordRule::new("your master", Intent::Master),
    KeywordRule::new("food", Intent::Food),
    KeywordRule::new("why?", Intent::QuestionWhy),
    KeywordRule::new("cook", Intent::Food),
    KeywordRule::new("bye", Intent::Farewell),
    KeywordRule::new("why not", Intent::WhyNot),
    KeywordRule::new("sex", Intent::Sex),
    KeywordRule::new("video", Intent::Video),
    KeywordRule::new("me?", Intent::QuestionMe),
    KeywordRule::new("you?", Intent::QuestionYou),
    KeywordRule::new("lurk", Intent::Lurking),
    KeywordRule::new("love", Intent::Love),
    KeywordRule::new("don't care", Intent::DontCare),
    KeywordRule::new("thanks yuri", Intent::ThanksYuri),
    KeywordRule::new("lol", Intent::Laughter),
    KeywordRule::new("yuri weather", Intent::WeatherSearch),
    KeywordRule::new("work", Intent::Work),
    KeywordRule::new("yuri i love you", Intent::LoveConfession),
    KeywordRule::new("haha", Intent::Laughter),
    KeywordRule::new("bye yuri", Intent::Leave),
    KeywordRule::new("yuri youtube", Intent::VideoSearch),
    KeywordRule::new("yuri advice", Intent::AdviceSearch),
    KeywordRule::new("yuri please stop", Intent::Stop),
    KeywordRule::new("yuri stop", Intent::Stop),
    KeywordRule::new("stop yuri", Intent::Stop),
    KeywordRule::new("liar", Intent::Liar),
    KeywordRule::new("hello", Intent::Hello),
    KeywordRule::new("i know", Intent::IKnow),
    KeywordRule::new("how are you", Intent::HowAreYou),
    KeywordRule::new("what are you", Intent::WhatAreYou),
    KeywordRule::new("again", Intent::Again),
];

/// Whole-message commands, consulted only when no rule matches.
///
/// Besides the help commands, typing an intent's tag name exactly fires it.
pub const LITERAL_COMMANDS: &[(&str, Intent)] = &[
    ("youtube", Intent::VideoHelp),
    ("weather", Intent::WeatherHelp),
    ("advice", Intent::AdviceHelp),
    (ACTIVATION_WORD, Intent::NameCall),
    ("ok", Intent::Ok),
    ("yes", Intent::Yes),
    ("no", Intent::No),
    ("test_weather", Intent::WeatherCardDemo),
    ("testyuri", Intent::TestCommand),
    ("yurimaster", Intent::Master),
    ("questionwhy", Intent::QuestionWhy),
    ("whynot", Intent::WhyNot),
    ("questionme", Intent::QuestionMe),
    ("questionyou", Intent::QuestionYou),
    ("dontcare", Intent::DontCare),
    ("iknow", Intent::IKnow),
    ("howareyou", Intent::HowAreYou),
    ("whatareyou", Intent::WhatAreYou),
];

/// Resolves normalized text to an [`Intent`].
#[derive(Debug, Clone)]
pub struct IntentResolver {
    rules: Vec<KeywordRule>,
    literals: Vec<(&'static str, Intent)>,
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::with_literals(DEFAULT_RULES.to_vec(), LITERAL_COMMANDS.to_vec())
    }
}

impl IntentResolver {
    /// Create a resolver over `rules`, evaluated in the given order, with no
    /// literal commands.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self::with_literals(rules, Vec::new())
    }

    pub fn with_literals(rules: Vec<KeywordRule>, literals: Vec<(&'static str, Intent)>) -> Self {
        Self { rules, literals }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn literals(&self) -> &[(&'static str, Intent)] {
        &self.literals
    }

    /// Resolve `normalized` (already trimmed and lowercased).
    ///
    /// Starts from the literal-command sentinel and lets every matching rule
    /// overwrite it. The full table is always scanned.
    pub fn resolve(&self, normalized: &str) -> Intent {
        self.rules
            .iter()
            .fold(self.literal_intent(normalized), |current, rule| {
                if normalized.contains(rule.pattern) {
                    rule.intent
                } else {
                    current
                }
            })
    }

    /// Every intent `resolve` can return with this rule table.
    pub fn reachable_intents(&self) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self
            .rules
            .iter()
            .map(|rule| rule.intent)
            .chain(self.literals.iter().map(|(_, intent)| *intent))
            .chain(std::iter::once(Intent::Unknown))
            .collect();
        intents.sort();
        intents.dedup();
        intents
    }

    /// The sentinel: the text itself when it is a known literal command.
    fn literal_intent(&self, normalized: &str) -> Intent {
        self.literals
            .iter()
            .find(|(literal, _)| *literal == normalized)
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Unknown)
    }
}
