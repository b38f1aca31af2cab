/// Modifier phrases prepended to every enhanced prompt, in order.
static REALISM_MODIFIERS: [&str; 4] = [
    "ultra realistic",
    "highly detailed",
    "professional photography",
    "8k resolution",
];

/// Closing phrase appended to every enhanced prompt.
static QUALITY_SUFFIX: &str = "sharp focus, dramatic lighting";

/// Wraps a prompt in fixed realism modifiers. Pure string assembly with no
/// failure modes; an empty prompt yields the modifier-only string.
pub fn enhance(prompt: &str) -> String {
    let modifiers = REALISM_MODIFIERS.join(", ");
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        format!("{}, {}", modifiers, QUALITY_SUFFIX)
    } else {
        format!("{}, {}, {}", modifiers, trimmed, QUALITY_SUFFIX)
    }
}
