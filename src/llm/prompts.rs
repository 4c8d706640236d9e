/// Fixed instruction placed in front of every transcript.
pub const SUMMARY_PROMPT_PREFIX: &str =
    "Summarize this YouTube video transcript in exactly 100 words:\n\n";

/// Build the summary prompt. The transcript is embedded verbatim.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!("{SUMMARY_PROMPT_PREFIX}{transcript}")
}
