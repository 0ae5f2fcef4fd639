//! Verdict badge, icon, and confidence bar shared by the fact-check views.

use leptos::prelude::*;
use wire::format::percent;
use wire::{Verdict, VerdictTone};

#[cfg(test)]
#[path = "verdict_test.rs"]
mod verdict_test;

fn tone_class(tone: VerdictTone) -> &'static str {
    match tone {
        VerdictTone::Positive => "verdict verdict--positive",
        VerdictTone::Mixed => "verdict verdict--mixed",
        VerdictTone::Warning => "verdict verdict--warning",
        VerdictTone::Negative => "verdict verdict--negative",
        VerdictTone::Unknown => "verdict verdict--unknown",
    }
}

/// Check for positive verdicts, cross for false, alert for the rest.
fn tone_icon(tone: VerdictTone) -> (&'static str, &'static str) {
    match tone {
        VerdictTone::Positive => ("✓", "verdict-icon verdict-icon--positive"),
        VerdictTone::Negative => ("✗", "verdict-icon verdict-icon--negative"),
        VerdictTone::Mixed | VerdictTone::Warning | VerdictTone::Unknown => ("!", "verdict-icon verdict-icon--alert"),
    }
}

fn bar_style(confidence: f64) -> String {
    format!("width: {}%", percent(confidence))
}

#[component]
pub fn VerdictBadge(verdict: Verdict) -> impl IntoView {
    let class = tone_class(verdict.tone());
    view! { <span class=class>{verdict.label().to_owned()}</span> }
}

#[component]
pub fn VerdictIcon(verdict: Verdict) -> impl IntoView {
    let (glyph, class) = tone_icon(verdict.tone());
    view! { <span class=class aria-hidden="true">{glyph}</span> }
}

/// "Bizonyossági szint: N%" with a proportional bar.
#[component]
pub fn ConfidenceBar(confidence: f64) -> impl IntoView {
    view! {
        <div class="confidence">
            <p class="confidence__label">{format!("Bizonyossági szint: {}%", percent(confidence))}</p>
            <div class="confidence__track">
                <div class="confidence__fill" style=bar_style(confidence)></div>
            </div>
        </div>
    }
}
