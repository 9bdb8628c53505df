// Prompt text for interview question generation.
// The five categories here are mirrored by `categories::CATEGORIES`.

/// Question generation prompt template. Replace `{resume_text}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter and interviewer. Based on the following resume, generate a set of meaningful interview questions.
The questions should cover:
1. Technical experience and projects mentioned in the resume. Make sure that you ask about any technical terms, algorithms, their preference of a tool, choice of data etcetera mentioned in the resume.
2. Domain knowledge relevant to their field. Infer the domain knowledge and ask questions apart from resume related to the domain. Example: if the applicant is from AI and has not mentioned anything about CNN or image processing, ask "Have you ever worked with images or do you know about CNN?"
3. Behavioral aspects and soft skills
4. Problem-solving abilities
5. Career goals and motivations

Please organize the questions into these categories and ensure they go beyond surface-level information.

Resume content:
{resume_text}

Generate 3-4 questions for each category. Format the output with clear category headings and return the questions in markdown format."#;

pub fn build_question_prompt(resume_text: &str) -> String {
    QUESTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
