use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct ExercisesResponse {
    pub exercises: Vec<Exercise>,
}

const GROUNDING: Exercise = Exercise {
    name: "5-4-3-2-1 Grounding Exercise",
    steps: &[
        "5 Things You Can See: Look around and name 5 things you can see.",
        "4 Things You Can Touch: Name 4 things you can touch.",
        "3 Things You Can Hear: Listen carefully and name 3 things you can hear.",
        "2 Things You Can Smell: Name 2 things you can smell.",
        "1 Thing You Can Taste: Name 1 thing you can taste.",
    ],
};

const BOX_BREATHING: Exercise = Exercise {
    name: "Box Breathing Exercise",
    steps: &[
        "Inhale for 4 seconds.",
        "Hold your breath for 4 seconds.",
        "Exhale for 4 seconds.",
        "Hold your breath for 4 seconds.",
        "Repeat for 5 minutes.",
    ],
};

const GUIDED_MEDITATION: Exercise = Exercise {
    name: "Guided Meditation",
    steps: &[
        "Find a quiet place and sit comfortably.",
        "Close your eyes and take a few deep breaths.",
        "Focus on your breath and let go of any thoughts.",
        "Continue for 5-10 minutes.",
    ],
};

pub async fn list_exercises() -> Json<ExercisesResponse> {
    Json(ExercisesResponse {
        exercises: vec![GROUNDING, BOX_BREATHING, GUIDED_MEDITATION],
    })
}
