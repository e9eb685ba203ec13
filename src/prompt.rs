//! Flowchart prompt construction.

/// Instructions placed ahead of the document.
const INSTRUCTIONS: &str = "\
Analyze the LaTeX document below and produce a Mermaid JS flowchart (use `graph TD;` for a \
top-down layout) that shows how its results depend on each other.

Nodes are the labeled results of the paper: lemmas, theorems, propositions and corollaries. \
Draw an arrow (`-->`) from an earlier result to every later result whose proof cites it or \
uses it as a prerequisite, for example `Lemma1 --> Theorem1`.

Infer dependencies only from explicit evidence: `\\ref{...}` commands, `\\cite{...}` commands \
that point at results labeled inside this paper, and textual references such as \"by Lemma 1\" \
or \"using Proposition 2\".

Name nodes after the labels found in the source (e.g. `lem:flow`, `thm:main`) or after their \
numbered names (e.g. Lemma 2.1, Theorem 3). Simplify labels that are too complex to be valid \
node ids.

Output *only* the Mermaid code, starting with `graph TD;` or `graph LR;`. Do not write any \
explanation before or after it.
";

/// Build the request sent to the generation service.
///
/// The document is embedded verbatim; the surrounding template never varies.
pub fn build_flowchart_prompt(document: &str) -> String {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + document.len() + 64);
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\nLaTeX Document Content:\n```latex\n");
    prompt.push_str(document);
    if !document.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n\nMermaid JS Flowchart:\n");
    prompt
}
