//! Rule-based strategy classification.
//!
//! Each asset class owns an ordered list of (predicate, outcome) rules,
//! evaluated top-down with first-match-wins semantics. The order is load
//! bearing: an extreme bias must win over a drawdown trigger even when both
//! hold. Every table ends with a catch-all, so classification always
//! produces advice.

use crate::domain::{Advice, AdviceLevel, AssetClass, Thresholds};

struct Rule {
    applies: fn(bias: f64, drawdown: f64, thresholds: &Thresholds) -> bool,
    level: AdviceLevel,
    advice: fn(thresholds: &Thresholds) -> String,
}

/// us-growth, us-broad and the onshore-value fallback share one cascade.
const BASELINE_RULES: &[Rule] = &[
    Rule {
        applies: |bias, _, t| bias < t.deep_low,
        level: AdviceLevel::Opportunity,
        advice: |t| {
            format!(
                "💎 Diamond pit: more than {:.0}% below the 250-day line. Contribute at 2.0x-3.0x.",
                t.deep_low.abs()
            )
        },
    },
    Rule {
        applies: |bias, _, _| bias < 0.0,
        level: AdviceLevel::Opportunity,
        advice: |_| {
            String::from("📀 Golden pit: price is under the 250-day line. Contribute at 1.5x-2.0x.")
        },
    },
    Rule {
        applies: |_, drawdown, _| drawdown < -15.0,
        level: AdviceLevel::Opportunity,
        advice: |_| {
            String::from(
                "📉 Sharp drop: more than 15% off the 250-day high. Contribute at 1.5x.",
            )
        },
    },
    Rule {
        applies: |bias, _, t| bias > t.high,
        level: AdviceLevel::Risk,
        advice: |t| {
            format!(
                "🔥 Overheated: more than {:.0}% above the 250-day line. Cut back to 0.5x or pause.",
                t.high
            )
        },
    },
    Rule {
        applies: |_, _, _| true,
        level: AdviceLevel::Normal,
        advice: |_| {
            String::from("😐 Normal range: trend is up but not stretched. Contribute at 1.0x.")
        },
    },
];

const GOLD_RULES: &[Rule] = &[
    Rule {
        applies: |bias, _, t| bias < t.deep_low,
        level: AdviceLevel::Opportunity,
        advice: |t| {
            format!(
                "💎 Extreme low estimate: more than {:.0}% under the 250-day line. Contribute at 2.0x.",
                t.deep_low.abs()
            )
        },
    },
    Rule {
        applies: |bias, _, _| bias < 0.0,
        level: AdviceLevel::Opportunity,
        advice: |_| {
            String::from("📀 Below trend: price is under the 250-day line. Contribute at 1.5x.")
        },
    },
    Rule {
        applies: |bias, _, t| bias < t.low,
        level: AdviceLevel::Opportunity,
        advice: |t| {
            format!(
                "🪙 Near support: within {:.0}% of the 250-day line. Contribute at 1.2x.",
                t.low
            )
        },
    },
    Rule {
        applies: |bias, _, t| bias > t.high,
        level: AdviceLevel::Risk,
        advice: |t| {
            format!(
                "🔥 Overheated: more than {:.0}% above the 250-day line. Cut back to 0.5x or pause.",
                t.high
            )
        },
    },
    Rule {
        applies: |_, _, _| true,
        level: AdviceLevel::Normal,
        advice: |_| String::from("😐 Normal uptrend: contribute at 1.0x."),
    },
];

const CN_GROWTH_RULES: &[Rule] = &[
    Rule {
        applies: |bias, _, t| bias < t.deep_low,
        level: AdviceLevel::Opportunity,
        advice: |t| {
            format!(
                "💣 Extreme crash: more than {:.0}% below the 250-day line. Contribute at 3.0x-4.0x.",
                t.deep_low.abs()
            )
        },
    },
    Rule {
        applies: |bias, _, t| bias < t.low,
        level: AdviceLevel::Opportunity,
        advice: |t| {
            format!(
                "📉 Broken support: below the {:.0}% support band. Contribute at 2.0x.",
                t.low
            )
        },
    },
    Rule {
        applies: |_, drawdown, _| drawdown < -30.0,
        level: AdviceLevel::Opportunity,
        advice: |_| {
            String::from(
                "🕳️ Deep pullback: more than 30% off the 250-day high. Contribute at 1.5x.",
            )
        },
    },
    Rule {
        applies: |bias, _, t| bias > t.high,
        level: AdviceLevel::Risk,
        advice: |t| {
            format!(
                "🚀 Extreme bubble: more than {:.0}% above the 250-day line. Stop buying or take profit.",
                t.high
            )
        },
    },
    Rule {
        applies: |_, _, _| true,
        level: AdviceLevel::Normal,
        advice: |_| String::from("🌊 Choppy range: no edge either way. Contribute at 1.0x."),
    },
];

fn rules_for(asset_class: AssetClass) -> &'static [Rule] {
    match asset_class {
        AssetClass::Gold => GOLD_RULES,
        AssetClass::CnGrowth => CN_GROWTH_RULES,
        AssetClass::UsGrowth | AssetClass::UsBroad | AssetClass::CnValue => BASELINE_RULES,
    }
}

/// Map computed indicators through the class's ordered cascade.
///
/// Pure and stateless: identical inputs always yield identical advice.
pub fn classify(
    asset_class: AssetClass,
    bias_pct: f64,
    drawdown_pct: f64,
    thresholds: &Thresholds,
) -> Advice {
    let rule = rules_for(asset_class)
        .iter()
        .find(|rule| (rule.applies)(bias_pct, drawdown_pct, thresholds))
        .expect("rule tables end with a catch-all");

    Advice {
        text: (rule.advice)(thresholds),
        level: rule.level,
    }
}
