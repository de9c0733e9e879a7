/// Builds the one prompt sent upstream for a topic.
///
/// The model is asked for a self-contained HTML fragment so the client can
/// render the response directly, and is told explicitly not to wrap the
/// output in markdown code fences or prepend commentary. Models ignore the
/// fence instruction often enough that the client strips residual fences
/// anyway (see `strip_code_fences`).
#[must_use]
pub fn tutorial_prompt(topic: &str) -> String {
    format!(
        "Write a beginner-friendly tutorial about \"{topic}\".\n\
         Respond with a self-contained HTML fragment only: use <h1> for the title, \
         <h2> for section headings, <p> for paragraphs, <ul> and <li> for lists, \
         <strong> and <em> for emphasis, and <pre><code> blocks for code samples.\n\
         Do not wrap the output in markdown code fences (no ``` or ```html) and do \
         not add any preamble or commentary before the HTML."
    )
}
