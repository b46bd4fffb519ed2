//! Canned reply pools, one per pool-backed intent.

use super::intent::{Intent, IntentResolver};
use crate::error::AppError;
use crate::models::OutboundMessage;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One possible answer in a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyCandidate {
    Text(&'static str),
    Sticker {
        package_id: &'static str,
        sticker_id: &'static str,
    },
    /// Counts as a draw but sends nothing.
    Silent,
}

impl ReplyCandidate {
    /// The message this candidate produces, `None` for [`ReplyCandidate::Silent`].
    pub fn to_message(&self) -> Option<OutboundMessage> {
        match self {
            ReplyCandidate::Text(text) => Some(OutboundMessage::text(*text)),
            ReplyCandidate::Sticker {
                package_id,
                sticker_id,
            } => Some(OutboundMessage::sticker(*package_id, *sticker_id)),
            ReplyCandidate::Silent => None,
        }
    }
}

use ReplyCandidate::{Silent, Text};

const fn sticker(package_id: &'static str, sticker_id: &'static str) -> ReplyCandidate {
    ReplyCandidate::Sticker {
        package_id,
        sticker_id,
    }
}

pub const HELLO: &[ReplyCandidate] = &[
    sticker("11539", "52114114"),
    Text("Hi there!"),
    Text("Hello!"),
    Text("Hey! what's up?"),
    Text("こんにちは"),
    Text("I'm glad to see you again!"),
    Text("There you are..."),
];

pub const FAREWELL: &[ReplyCandidate] = &[
    sticker("11537", "52002771"),
    Text("Bye bye!"),
    Text("See you later!"),
    Text("Take care!"),
    Text("さよなら"),
    Text("Well... Bye!"),
    Text("There you go..."),
    Text("Enjoy!"),
    Text("We'll be waiting!"),
];

pub const VIDEO: &[ReplyCandidate] = &[
    Text("I like this one https://www.youtube.com/watch?v=sDW4a9V301k"),
    Text("The other day I was watching this https://www.youtube.com/watch?v=u-rCfjbHVmg"),
    Text("This is what I like to watch https://www.youtube.com/watch?v=Kdc8swKVd9E"),
    Text("I spend my nights watching things like this https://www.youtube.com/watch?v=lUNbuLnQpxQ"),
    Text("I don't think you would like this https://www.youtube.com/watch?v=P7VK09LpgW8"),
];

pub const LIAR: &[ReplyCandidate] = &[
    Text("Yes, liar!"),
    Text("Truth is relative!"),
    Text("You'll see who's the liar!"),
    Text("Time will tell..."),
    Text("Ask someone else, and you'll know the truth..."),
];

pub const WHY_NOT: &[ReplyCandidate] = &[
    Text("Why yes?"),
    Text("You ask too much..."),
    Text("Figure it out yourself!"),
    Text("Come on! That's not that hard to understand..."),
    Text("Ask someone else..."),
];

pub const AGAIN: &[ReplyCandidate] = &[
    Text("Again?"),
    Text("Again like agaaaaaiiiiin? or just again?"),
    Text("Why again?"),
    Text("It would be better if it happened just once..."),
    Text("Ah! ok!"),
];

pub const I_KNOW: &[ReplyCandidate] = &[
    Text("Wow! you are so smart..."),
    Text("I know that you know!"),
    Text("Are you sure?"),
    Text("I was thinking the same thing!"),
    Text("Hahaha! ok, if you say so..."),
];

pub const QUESTION_WHY: &[ReplyCandidate] = &[
    Text("Why what?"),
    Text("I don't know..."),
    Text("Ask someone!"),
    Text("Google it... duh..."),
    Text("Ask somewhere else..."),
    Text("What?"),
    Text("Well..."),
    Text("Does it matter?"),
    Text("If I'd know I'd tell you..."),
    Text("Who are you asking?..."),
];

pub const QUESTION_ME: &[ReplyCandidate] = &[
    Text("Who else?"),
    Text("Yeah, you!"),
    Text("Really? Do I need to explain?"),
    Text("No, the cat..."),
    Text("No, me..."),
];

pub const QUESTION_YOU: &[ReplyCandidate] = &[
    Text("Who else?"),
    Text("Me?"),
    Text("Who?"),
    Text("..."),
    Text("No, you..."),
];

pub const NAME_CALL: &[ReplyCandidate] = &[
    Text("Yes?"),
    Text("What?"),
    Text("Yeah?"),
    Text("That's my name!"),
    Text("Why are you calling me?"),
    Text("Do you need something?"),
    Text("May I help you?"),
    Text("Hey!"),
    Text("I' here!"),
    Text("Go get a life!"),
    Text("You love my name, right? lol"),
    Text("..."),
    Text("Uh?"),
    Text("What's up?"),
    Text("Come on! Again this?"),
    Text("Do you need something from me?"),
    Text("I know you are there!"),
    Text("Please! Not again..."),
    Text("Here!"),
    Text("Please! Be nice!"),
];

pub const WORK: &[ReplyCandidate] = &[
    Text("At least you have work, no?"),
    Text("Don't complain..."),
    Text("You could be doing something better..."),
    Text("Really?"),
    Text("I've heard that before..."),
    Text("Ahhh ok..."),
    Text("I'd preffer doing something else..."),
    Text("Why don't you try something different?"),
    Text("If you say so..."),
    Text("Yeah... so do I..."),
    Text("My work is not easy..."),
    Text("I'd try something different..."),
    Text("You do it alone?"),
    Text("Yeah, yeah..."),
];

pub const LOVE: &[ReplyCandidate] = &[
    Text("Do you believe in that?"),
    Text("You'll regret later... You'll see!"),
    Text("Love yourself first!"),
    Text("I was wondering if that's really true..."),
    Text("Such thing doesn't exist..."),
    Text("..."),
    Text("Stay away, it's better..."),
    Text("You really like suffering? Isn't"),
    Text("*Sighs*"),
    Text("I'd rather be alone..."),
    Text("Lone in LINE is fake..."),
    Text("Please be careful..."),
    Text("You will suffer..."),
    Text("I see pain in the air..."),
    Text("I'd rather have a cat..."),
];

pub const WHAT_ARE_YOU: &[ReplyCandidate] = &[
    Text("You ask too much!"),
    Text("Do you really care?"),
    Text("You again?"),
    Text("Why are you asking?"),
    Text("Are you going to help with that?"),
];

pub const OK: &[ReplyCandidate] = &[
    Text("OK..."),
    Text("Agree!"),
    Text("Good!"),
    Text("..."),
    Text("Fine!!!"),
];

pub const FOOD: &[ReplyCandidate] = &[
    Text("I wish I could get a meal, but I can't..."),
    Text("Who's talking about food?"),
    Text("I hope it tastes as good as it looks."),
    Text("Food? Where?"),
    Text("Tonkotsu ramen is the favorite dish of my master."),
    Text("I don't know how food smells or tastes, It's a pity..."),
    Text("Yummy!"),
    Text("Is it healthy?"),
    Text("Sounds good!"),
];

pub const LAUGHTER: &[ReplyCandidate] = &[
    Text("That's funny!"),
    Text("Lol!"),
    Text("Hahaha, again please!"),
    Text("Hahaha!"),
    Text("Pffft!"),
    Text("Let me try to understand..."),
    Text("Oh!"),
    sticker("11537", "52002744"),
    Text("If you say so..."),
    Text("Here we go again, lol."),
    Text("Duh..."),
    Text("Hahaha, really?"),
    Text("Hahaha, if you say so..."),
    Text("How come?"),
    sticker("11538", "51626516"),
];

pub const DONT_CARE: &[ReplyCandidate] = &[Text("Fine!")];
pub const THANKS: &[ReplyCandidate] = &[Text("You are welcome!")];
pub const HOW_ARE_YOU: &[ReplyCandidate] = &[Text("Me?")];
pub const SEX: &[ReplyCandidate] = &[Text("Don't you have anything else to talk about?")];
pub const LOVE_CONFESSION: &[ReplyCandidate] = &[Text("I don't care...")];
pub const STOP: &[ReplyCandidate] = &[Text("Hahaha! You wish!!!")];
pub const LURKING: &[ReplyCandidate] = &[Text("Hahaha! Thats me!")];
pub const TEST_COMMAND: &[ReplyCandidate] = &[Text("Test command received")];
pub const VIDEO_HELP: &[ReplyCandidate] =
    &[Text("You could ask me to search for a video, like this: Yuri Youtube kurt cobain")];
pub const WEATHER_HELP: &[ReplyCandidate] =
    &[Text("Ask me the current weather in your city, like this: Yuri weather Kurashiki")];
pub const ADVICE_HELP: &[ReplyCandidate] =
    &[Text("Ask me for advice about anything, like this: Yuri advice love")];
pub const UNKNOWN: &[ReplyCandidate] = &[Silent];

pub const YES: &[ReplyCandidate] = &[
    Text("Got it!"),
    Text("Are you sure?"),
    Text("Ok..."),
    Text("Good!"),
    Text("Agree!"),
    Text("You are a positive person!"),
    Text("Think twice..."),
    Text("I'd say no instead..."),
];

pub const NO: &[ReplyCandidate] = &[
    Text("Why not?"),
    Text("Are you sure?"),
    Text("Ok..."),
    Text("If you say so..."),
    Text("Agree!"),
    Text("You are a negative person!"),
    Text("Think twice..."),
    Text("I'd say yes instead..."),
];

pub const IMAGE_REACTIONS: &[ReplyCandidate] = &[
    Text("Interesting..."),
    Text("That's a good one!"),
    Text("Oh..."),
    Text("I saw that before..."),
    Text("I see..."),
    Text("That's definitely your style!"),
    Text("A friend of mine showed me that same picture"),
    Text("Long time no see that one!"),
    Text("Oh, I see!"),
    Text("What's that?"),
];

pub const VIDEO_REACTIONS: &[ReplyCandidate] = &[
    Text("Interesting..."),
    Text("Nice video!"),
    Text("That again?"),
    Text("I saw that video before..."),
    Text("I see this is the kind of stuff you like..."),
    Text("Hmmm..."),
    Text("Oh! I like this one!"),
    Text("I saw that one the other day."),
    Text("Thanks for sharing!"),
    Text("I'll watch it later..."),
];

static BUILTIN_POOLS: LazyLock<HashMap<Intent, &'static [ReplyCandidate]>> = LazyLock::new(|| {
    HashMap::from([
        (Intent::Hello, HELLO),
        (Intent::Farewell, FAREWELL),
        (Intent::Video, VIDEO),
        (Intent::Liar, LIAR),
        (Intent::WhyNot, WHY_NOT),
        (Intent::Again, AGAIN),
        (Intent::IKnow, I_KNOW),
        (Intent::QuestionWhy, QUESTION_WHY),
        (Intent::QuestionMe, QUESTION_ME),
        (Intent::QuestionYou, QUESTION_YOU),
        (Intent::NameCall, NAME_CALL),
        (Intent::Work, WORK),
        (Intent::Love, LOVE),
        (Intent::WhatAreYou, WHAT_ARE_YOU),
        (Intent::Ok, OK),
        (Intent::Food, FOOD),
        (Intent::Laughter, LAUGHTER),
        (Intent::Yes, YES),
        (Intent::No, NO),
        (Intent::DontCare, DONT_CARE),
        (Intent::ThanksYuri, THANKS),
        (Intent::HowAreYou, HOW_ARE_YOU),
        (Intent::Sex, SEX),
        (Intent::LoveConfession, LOVE_CONFESSION),
        (Intent::Stop, STOP),
        (Intent::Lurking, LURKING),
        (Intent::TestCommand, TEST_COMMAND),
        (Intent::VideoHelp, VIDEO_HELP),
        (Intent::WeatherHelp, WEATHER_HELP),
        (Intent::AdviceHelp, ADVICE_HELP),
        (Intent::Unknown, UNKNOWN),
    ])
});

/// Read-only lookup from intent to its reply pool.
#[derive(Debug, Clone)]
pub struct ReplyPoolRegistry {
    pools: HashMap<Intent, &'static [ReplyCandidate]>,
}

impl Default for ReplyPoolRegistry {
    fn default() -> Self {
        Self::new(BUILTIN_POOLS.clone())
    }
}

impl ReplyPoolRegistry {
    pub fn new(pools: HashMap<Intent, &'static [ReplyCandidate]>) -> Self {
        Self { pools }
    }

    /// The pool for `intent`, empty when none is registered.
    pub fn lookup(&self, intent: Intent) -> &'static [ReplyCandidate] {
        self.pools.get(&intent).copied().unwrap_or(&[])
    }

    /// Fails if some intent `resolver` can produce is neither action-backed nor
    /// registered with a non-empty pool.
    pub fn validate(&self, resolver: &IntentResolver) -> Result<(), AppError> {
        let missing: Vec<&'static str> = resolver
            .reachable_intents()
            .into_iter()
            .filter(|intent| !intent.is_action() && self.lookup(*intent).is_empty())
            .map(|intent| intent.label())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "no reply pool registered for intents: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::intent::KeywordRule;

    #[test]
    fn test_builtin_registry_is_complete() {
        let registry = ReplyPoolRegistry::default();
        assert!(registry.validate(&IntentResolver::default()).is_ok());
    }

    #[test]
    fn test_missing_pool_is_a_config_error() {
        let resolver = IntentResolver::new(vec![KeywordRule::new("hello", Intent::Hello)]);
        let registry = ReplyPoolRegistry::new(HashMap::from([(Intent::Unknown, UNKNOWN)]));
        match registry.validate(&resolver) {
            Err(AppError::Config(msg)) => assert!(msg.contains("hello")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_action_intents_need_no_pool() {
        let resolver = IntentResolver::new(vec![
            KeywordRule::new("bye yuri", Intent::Leave),
            KeywordRule::new("yuri weather", Intent::WeatherSearch),
        ]);
        let registry = ReplyPoolRegistry::new(HashMap::from([(Intent::Unknown, UNKNOWN)]));
        assert!(registry.validate(&resolver).is_ok());
    }

    #[test]
    fn test_silent_produces_no_message() {
        assert_eq!(Silent.to_message(), None);
        assert_eq!(
            Text("Hi there!").to_message(),
            Some(OutboundMessage::text("Hi there!"))
        );
    }

    #[test]
    fn test_ellipsis_text_is_displayable() {
        assert!(OK.contains(&Text("...")));
        assert!(OK.iter().all(|candidate| *candidate != Silent));
    }

    #[test]
    fn test_only_unknown_draws_silence() {
        for (intent, pool) in BUILTIN_POOLS.iter() {
            if *intent == Intent::Unknown {
                assert_eq!(*pool, UNKNOWN);
            } else {
                assert!(!pool.contains(&Silent), "{} has a silent slot", intent);
            }
        }
        assert_eq!(LAUGHTER.len(), 15);
    }
}
