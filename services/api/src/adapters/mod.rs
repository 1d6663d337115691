pub mod completion;
pub mod pdf;

pub use completion::OpenAiCompletionClient;
pub use pdf::PdfTextExtractor;
