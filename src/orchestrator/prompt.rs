//! Prompt construction for review, summary, commit message and intent calls.

use crate::models::ChunkReview;

/// Prompt for reviewing one chunk of a diff.
pub fn review_chunk(chunk: &str, language: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "As an experienced code reviewer, conduct a detailed review of the Git diff \
        chunk below. Evaluate code quality, spot potential issues, and offer \
        suggestions for improvement in a concise, structured manner.\n\n",
    );

    prompt.push_str(&format!("## Diff\n\n```diff\n{chunk}\n```\n\n"));

    prompt.push_str(
        "## Instructions\n\n\
        1. Review **only** the added, edited, or deleted lines.\n\
        2. Assess readability, maintainability, and adherence to best practices.\n\
        3. Identify potential bugs, performance concerns, or security vulnerabilities.\n\
        4. Give clear and actionable suggestions.\n\n\
        Use this format for every comment:\n\n\
        '[tag] - <file path>:<line number(s)> - <comment>'\n\n\
        Tags:\n\
        - **[CRITICAL]**: serious issues that must be resolved (bugs, security risks).\n\
        - **[SUGGESTION]**: recommended improvements or alternative approaches.\n\
        - **[STYLE]**: style or formatting issues (naming, spacing).\n\
        - **[IMPROVEMENT]**: opportunities to optimize code or improve performance.\n\
        - **[NICE TO HAVE]**: optional improvements not required for approval.\n\n\
        If no issues are found, simply state: \"No feedback for this chunk.\"\n\n",
    );

    prompt.push_str(&format!("Write your review in {language}.\n"));
    prompt
}

/// Prompt for the final summary over all per-chunk reviews.
///
/// Each call to the backend is stateless, so the reviews are embedded
/// rather than referenced.
pub fn review_summary(reviews: &[ChunkReview], language: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Based on the reviews of all diff chunks below, provide a brief summary of \
        the overall changes and the main points of feedback. Focus on the most \
        important issues.\n\n",
    );

    prompt.push_str("## Chunk Reviews\n\n");
    for review in reviews {
        prompt.push_str(&format!(
            "### Chunk {}\n\n{}\n\n",
            review.index + 1,
            review.text.trim()
        ));
    }

    prompt.push_str(&format!("Write your summary in {language}.\n"));
    prompt
}

/// Prompt for a Conventional Commits message over the whole diff.
pub fn commit_message(diff: &str) -> String {
    format!(
        "You are an experienced developer writing a concise, clear commit message \
        for the Git diff below, following the Conventional Commits specification \
        (https://www.conventionalcommits.org/en/v1.0.0/#summary).\n\n\
        ## Types\n\n\
        - `feat`: a new feature\n\
        - `fix`: a bug fix\n\
        - `docs`: documentation only changes\n\
        - `style`: changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons)\n\
        - `refactor`: a code change that neither fixes a bug nor adds a feature\n\
        - `perf`: a code change that improves performance\n\
        - `test`: adding missing tests or correcting existing tests\n\
        - `build`: changes that affect the build system or external dependencies\n\
        - `ci`: changes to CI configuration files and scripts\n\
        - `chore`: other changes that don't modify src or test files\n\n\
        ## Structure\n\n\
        ```\n\
        <type>[optional scope]: <description>\n\
        - <bullet point 1>\n\
        - <bullet point 2>\n\
        ```\n\n\
        - **Title**: at most 72 characters, in the '<type>[optional scope]: <description>' format.\n\
        - **Bullet points**: concise summary of the key changes.\n\n\
        ## Git Diff\n\n\
        ```diff\n{diff}\n```\n\n\
        Generate a single, well-structured commit message in English with a title \
        and bullet points as specified. Output only the commit message.\n"
    )
}

/// Prompt asking for a one-sentence explanation of a `git diff` command.
pub fn explain_command(command: &str, language: &str) -> String {
    format!(
        "Git diff command: {command}\n\n\
        In {language}, give a concise one-sentence explanation of what this command \
        does. If it appears to be an invalid command, respond with \
        \"This may be an invalid command.\"\n"
    )
}
