//! Built-in spawn catalog

pub const DEFAULT_WORDS: &[&str] = &[
    "orbit", "pulse", "flash", "matrix", "echo", "slide", "glow", "spark", "trace", "drift",
    "storm", "wave", "pixel", "shift", "flare", "bounce", "swift", "nova", "comet", "aura",
    "nexus", "quark", "vivid", "sonic", "lumen", "prism", "glyph", "rally", "sprint", "prime",
    "chase", "fleet", "clear", "bold", "rapid", "punch", "blaze", "ripple", "bright", "shine",
    "racer", "quick", "laser", "hatch", "tempo", "rush", "dodge", "sparkle", "tumble", "sketch",
    "vector", "cinder", "ember", "flick", "rider", "streak", "swirl", "hustle", "snap", "scale",
    "craft", "thrive", "climb", "float", "pilot", "atlas", "rover", "drone", "pioneer", "zenith",
    "flashy", "ready", "punchy", "burst", "dart", "fling", "hover", "jolt", "leap", "loom",
    "loop", "nudge", "quiver", "scout", "swoop", "twist", "vault", "vortex", "whirl", "zip",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_lowercase_and_unique() {
        let unique: HashSet<_> = DEFAULT_WORDS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_WORDS.len());
        assert!(DEFAULT_WORDS.iter().all(|w| *w == w.to_lowercase()));
    }
}
