use crate::models::{Age, Gender, RestoreSettings, Smile};

const RESTORE_PREAMBLE: &str = "Please restore this old and potentially damaged photograph. ";
const RESTORE_CLOSING: &str =
    "\n\nThe final output should be only the restored image, without any text or annotations.";
const VIETNAMESE_CONTEXT: &str = "The subjects in the photo are likely Vietnamese. Keep this cultural context in mind for accurate restoration of features and skin tones. ";
const SMILE_CLAUSE: &str = "If possible, add a subtle, natural-looking smile to the subjects. ";

pub const FACE_SWAP_PROMPT: &str = "You are given two photographs. Take the face of the person in the first image and place it onto the person in the second image. \
Keep the body, pose, hair outline, clothing and background of the second image unchanged. \
Match the lighting direction, color temperature and skin tone of the second image, and align the head angle and perspective so the face sits naturally on the neck. \
Preserve the identity and facial features of the first image and blend the edges seamlessly with no visible seams. \
\n\nThe final output should be only the resulting image, without any text or annotations.";

/// Enhancement toggles paired with their clause, in prompt order.
fn enhancement_clauses(settings: &RestoreSettings) -> [(bool, &'static str); 8] {
    [
        (settings.colorize, "colorize it vibrantly and naturally"),
        (
            settings.high_quality,
            "enhance it to high quality, improving resolution and clarity",
        ),
        (settings.redraw_hair, "carefully redraw and define hair details"),
        (
            settings.sharpen_background,
            "sharpen the background details while keeping focus on the subjects",
        ),
        (
            settings.stick_to_face_details,
            "preserve and enhance the original facial features accurately",
        ),
        (
            settings.sharpen_wrinkles,
            "subtly sharpen wrinkles and textures for a more realistic look",
        ),
        (
            settings.redraw_clothing,
            "redraw and enhance the details of the clothing",
        ),
        (
            settings.sharpen,
            "sharpen the overall image so edges and fine details look crisp",
        ),
    ]
}

pub fn build_restore_prompt(settings: &RestoreSettings) -> String {
    let mut prompt = String::from(RESTORE_PREAMBLE);

    let enhancements: Vec<&str> = enhancement_clauses(settings)
        .into_iter()
        .filter_map(|(enabled, clause)| enabled.then_some(clause))
        .collect();
    if !enhancements.is_empty() {
        prompt.push_str("Apply the following enhancements: ");
        prompt.push_str(&enhancements.join(", "));
        prompt.push_str(". ");
    }

    if settings.is_vietnamese {
        prompt.push_str(VIETNAMESE_CONTEXT);
    }

    if settings.gender != Gender::Automatic {
        prompt.push_str(&format!("The gender of the main subject is {}. ", settings.gender));
    }
    if settings.age != Age::Automatic {
        prompt.push_str(&format!(
            "The age of the main subject is approximately {}. ",
            settings.age
        ));
    }
    // Neutral adds nothing, same as Automatic.
    if settings.smile == Smile::AddSmile {
        prompt.push_str(SMILE_CLAUSE);
    }

    if !settings.advanced_prompt.is_empty() {
        prompt.push_str(&format!(
            "\n\nAdvanced user request: \"{}\"",
            settings.advanced_prompt
        ));
    }

    prompt.push_str(RESTORE_CLOSING);
    prompt
}
