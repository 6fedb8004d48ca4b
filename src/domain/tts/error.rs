#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("annotation extraction failed: {0}")]
    Extraction(String),
    #[error("synthesis failed after {attempts} attempts")]
    BudgetExhausted { attempts: u32 },
}
