//! Canned reply texts.

pub const COOK_RESPONSES: &[&str] = &[
    "🔥 Someone’s about to burn down the kitchen!",
    "👨‍🍳 Is it hot in here, or is someone cooking up trouble?",
    "🍳 Uh oh… I smell something burning.",
    "🥘 The stove’s on and the fire alarm’s about to go off!",
    "🔥🔥🔥 Gordon Ramsay is shaking.",
    "🍔 Who gave them the spatula?!",
    "🧯 Quick, get the fire extinguisher!",
    "🍜 Someone’s cooking… and it’s getting *spicy*!",
];

pub const DEFAULT_REBUKE: &str = "🧴 Put the bleach down. Nobody is drinking bleach today. 🚫";

pub const NO_TARGETS_YET: &str = "No targets yet—nobody typed before this sticker. 👀";

pub fn nobody_else_to_shoot(shooter: &str) -> String {
    format!("{shooter} fired, but there’s no one else to shoot. 🫥")
}

pub fn shot(shooter: &str, target: &str) -> String {
    format!("🔫 {shooter} shot {target}! 💀")
}

pub fn tally_line(handle: &str, total: u64) -> String {
    let times = if total == 1 { "time" } else { "times" };
    format!("{handle} has been called out {total} {times}.")
}
