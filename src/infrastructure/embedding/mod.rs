mod gemini;

pub use gemini::GeminiEmbedding;
