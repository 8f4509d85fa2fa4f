mod gemini;

pub use gemini::GeminiLlm;
