//! Canonical model identifiers per provider

pub mod gemini {
    /// Gemini 2.0 Flash (experimental)
    pub const FLASH_2_0_ID: &str = "gemini-2.0-flash-exp";
}

pub mod groq {
    /// Llama 3.3 70B (versatile)
    pub const LLAMA_3_3_70B_ID: &str = "llama-3.3-70b-versatile";
}
