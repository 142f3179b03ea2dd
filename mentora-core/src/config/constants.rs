/// Model ID constants shared by the provider adapters and the configuration layer
pub mod models {
    // Google/Gemini models
    pub mod google {
        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";

        pub const DEFAULT_MODEL: &str = GEMINI_2_5_FLASH;
        pub const SUPPORTED_MODELS: &[&str] = &[
            GEMINI_2_5_FLASH,
            "gemini-2.5-flash-lite",
            GEMINI_2_5_PRO,
            "gemini-2.0-flash",
        ];
    }

    // OpenAI models
    pub mod openai {
        pub const GPT_4O: &str = "gpt-4o";
        pub const GPT_4O_MINI: &str = "gpt-4o-mini";

        pub const DEFAULT_MODEL: &str = GPT_4O_MINI;
        pub const SUPPORTED_MODELS: &[&str] = &[GPT_4O, GPT_4O_MINI, "gpt-4.1", "gpt-4.1-mini"];
    }

    // Anthropic models
    pub mod anthropic {
        pub const CLAUDE_SONNET_4_20250514: &str = "claude-sonnet-4-20250514";
        pub const CLAUDE_3_5_HAIKU_20241022: &str = "claude-3-5-haiku-20241022";

        pub const DEFAULT_MODEL: &str = CLAUDE_SONNET_4_20250514;
        pub const SUPPORTED_MODELS: &[&str] = &[
            CLAUDE_SONNET_4_20250514,
            CLAUDE_3_5_HAIKU_20241022,
        ];
    }
}

pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
}

/// Environment variable names for provider credentials, resolved by the server binary
pub mod env_keys {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
}

pub mod defaults {
    use super::models;

    pub const DEFAULT_PROVIDER: &str = "gemini";
    pub const DEFAULT_MODEL: &str = models::google::DEFAULT_MODEL;
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;
    pub const CONFIG_FILE_NAME: &str = "mentora.toml";
}

/// Bounds shared between input validation and output-schema construction
pub mod limits {
    /// Upper bound on the number of quiz questions per request and per reply
    pub const MAX_QUIZ_QUESTIONS: usize = 10;
    /// Default question count when the caller omits it
    pub const DEFAULT_QUIZ_QUESTIONS: u8 = 5;
    /// Upper bound on exercises attached to a single lesson module
    pub const MAX_MODULE_EXERCISES: usize = 10;
}
