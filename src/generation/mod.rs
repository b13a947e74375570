pub mod extract;
pub mod fallback;
pub mod pipeline;
pub mod prompt;
pub mod request;
pub mod result;

pub use pipeline::{ContentGenerator, StudyPack};
pub use request::{
    learner_context, study_plan_context, GenerationKind, GenerationParameters, GenerationRequest,
    SafetySetting,
};
pub use result::{
    ContentAnalysis, Difficulty, Flashcard, GenerationResult, Priority, QuizQuestion,
    Recommendation, StudyPlan, StudyWeek,
};
