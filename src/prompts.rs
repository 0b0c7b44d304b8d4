/// Words that already steer the model toward producing an image.
pub const IMAGE_TRIGGER_WORDS: [&str; 7] = [
    "picture",
    "image",
    "render",
    "draw",
    "photo",
    "illustration",
    "art",
];

/// Appended to generation prompts that contain none of [`IMAGE_TRIGGER_WORDS`].
pub const IMAGE_HINT_SUFFIX: &str = " picture";

/// Prepare a raw user prompt for pure generation.
///
/// Matching is a case-insensitive substring test, so "Artist" counts as a
/// trigger. The original casing of the prompt is always preserved.
pub fn shape(raw_prompt: &str) -> String {
    let lowered = raw_prompt.to_lowercase();
    if IMAGE_TRIGGER_WORDS
        .iter()
        .any(|word| lowered.contains(word))
    {
        raw_prompt.to_string()
    } else {
        format!("{}{}", raw_prompt, IMAGE_HINT_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_appends_hint_without_trigger() {
        assert_eq!(shape("a cat on a skateboard"), "a cat on a skateboard picture");
    }

    #[test]
    fn test_shape_keeps_prompt_with_trigger_in_any_case() {
        for prompt in [
            "A PHOTO of a lighthouse",
            "Draw me a dragon",
            "an Illustration of autumn",
            "render a castle",
            "pixel art frog",
            "an image of rain",
        ] {
            assert_eq!(shape(prompt), prompt);
        }
    }

    #[test]
    fn test_shape_preserves_original_casing() {
        assert_eq!(shape("Sunset Over TOKYO"), "Sunset Over TOKYO picture");
    }

    #[test]
    fn test_shape_is_stable_once_applied() {
        let once = shape("mountain lake");
        assert_eq!(shape(&once), once);
    }

    #[test]
    fn test_shape_matches_substrings() {
        // "art" inside "party" is enough
        assert_eq!(shape("birthday party"), "birthday party");
    }

    #[test]
    fn test_shape_empty_prompt() {
        assert_eq!(shape(""), " picture");
    }
}
