//! Turns structured report data into prose via the language model.

use crate::config::PromptFormat;
use crate::context::{AppLlm, Context};
use crate::di::FromContext;
use crate::llm::ChatRequest;
use crate::models::{
    ExpertCandidate, FieldResearcher, FieldTrends, Narrative, ResearcherMatch, ResearcherProfile,
    ThesisActivity,
};

use super::prompts;

/// The kinds of prose the synthesizer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeTask {
    ProfileAnalysis,
    ExpertRanking,
    FieldBrief,
    MatchAnalysis,
}

impl NarrativeTask {
    pub fn max_tokens(self) -> u32 {
        match self {
            NarrativeTask::ProfileAnalysis => 1000,
            NarrativeTask::ExpertRanking => 1200,
            NarrativeTask::FieldBrief => 1500,
            NarrativeTask::MatchAnalysis => 1000,
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            NarrativeTask::ProfileAnalysis | NarrativeTask::ExpertRanking => 0.3,
            NarrativeTask::FieldBrief => 0.5,
            NarrativeTask::MatchAnalysis => 0.7,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            NarrativeTask::ProfileAnalysis => "profile_analysis",
            NarrativeTask::ExpertRanking => "expert_ranking",
            NarrativeTask::FieldBrief => "field_brief",
            NarrativeTask::MatchAnalysis => "match_analysis",
        }
    }
}

/// Builds one prompt per task and makes exactly one model call for it.
///
/// Model failures never escape as errors; they become
/// [`Narrative::Unavailable`] so the structured part of a report survives.
#[derive(FromContext, Clone)]
pub struct NarrativeSynthesizer {
    llm: AppLlm,
    #[from_context(with = "Context::prompt_format")]
    format: PromptFormat,
}

impl NarrativeSynthesizer {
    /// Sends a prepared prompt with the task's token budget and temperature.
    pub async fn synthesize(&self, task: NarrativeTask, prompt: String) -> Narrative {
        let request = ChatRequest {
            system: Some(prompts::SYSTEM_PROMPT.to_string()),
            prompt,
            max_tokens: task.max_tokens(),
            temperature: task.temperature(),
        };

        match self.llm.complete(request).await {
            Ok(completion) => {
                tracing::debug!(task = task.as_str(), model = %completion.model, "Narrative generated");
                Narrative::Generated {
                    text: completion.text,
                    model: completion.model,
                    usage: completion.usage,
                }
            }
            Err(e) => {
                tracing::warn!(task = task.as_str(), error = %e, "Narrative unavailable");
                Narrative::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub async fn profile_analysis(
        &self,
        name: &str,
        profiles: &[ResearcherProfile],
        activities: &[ThesisActivity],
    ) -> Narrative {
        let prompt = prompts::profile_analysis(name, profiles, activities, self.format);
        self.synthesize(NarrativeTask::ProfileAnalysis, prompt).await
    }

    pub async fn expert_ranking(&self, topic: &str, experts: &[ExpertCandidate]) -> Narrative {
        let prompt = prompts::expert_ranking(topic, experts, self.format);
        self.synthesize(NarrativeTask::ExpertRanking, prompt).await
    }

    pub async fn field_brief(
        &self,
        field: &str,
        researchers: &[FieldResearcher],
        trends: &FieldTrends,
    ) -> Narrative {
        let prompt = prompts::field_brief(field, researchers, trends, self.format);
        self.synthesize(NarrativeTask::FieldBrief, prompt).await
    }

    pub async fn match_analysis(
        &self,
        name: &str,
        keywords: &[String],
        matches: &[ResearcherMatch],
    ) -> Narrative {
        let prompt = prompts::match_analysis(name, keywords, matches, self.format);
        self.synthesize(NarrativeTask::MatchAnalysis, prompt).await
    }
}
