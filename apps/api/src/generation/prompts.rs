// All LLM prompt templates for the Generation module.
// Placeholders are `{name}` and are filled by `prompt_builder::fill_template`
// in a single pass, so user text containing braces is never re-expanded.

/// Professional summary prompt.
/// Replace: {experience_context}, {summary_focus}, {work_experience}, {education},
///          {skills}, {first_point}, {last_point}, {grounding_instruction}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Based on the following information, write a compelling professional summary for a resume.
The candidate has {experience_context}. Focus on {summary_focus}.
The summary should be 3-4 sentences, highlight key strengths, and be tailored to the candidate's background.

Work Experience: {work_experience}
Education: {education}
Key Skills: {skills}

Write a professional summary that:
1. {first_point}
2. Highlights 2-3 key areas of expertise or learning
3. Mentions relevant skills and potential contributions
4. Ends with career goals or value proposition
5. {last_point}

{grounding_instruction}

Respond with just the professional summary text, no additional formatting."#;

/// Bullet enhancement prompt for one work-experience entry.
/// Replace: {job_title}, {company}, {description}, {json_only_instruction}
pub const BULLETS_PROMPT_TEMPLATE: &str = r#"Transform the following job description into 3-5 professional bullet points for a resume.
Use action verbs, quantify achievements where possible, and focus on impact and results.

Job Title: {job_title}
Company: {company}
Description: {description}

Guidelines:
1. Start each bullet point with a strong action verb
2. Focus on achievements and results, not just responsibilities
3. Use specific numbers, percentages, or metrics only where the description supports them
4. Keep each bullet point to 1-2 lines
5. Make it ATS-friendly

Return the response as a JSON object with this format:
{"bullet_points": ["bullet point 1", "bullet point 2", "bullet point 3"]}

{json_only_instruction}"#;

/// Cover letter prompt.
/// Replace: {name}, {email}, {location}, {work_experience}, {technical_skills},
///          {education}, {company_name}, {job_title}, {hiring_manager},
///          {company_info}, {job_description}, {tone_instruction},
///          {grounding_instruction}, {ats_instruction}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter based on the following information:

CANDIDATE INFORMATION:
Name: {name}
Email: {email}
Location: {location}

WORK EXPERIENCE:
{work_experience}

TECHNICAL SKILLS:
{technical_skills}

EDUCATION:
{education}

JOB INFORMATION:
Company: {company_name}
Position: {job_title}
Hiring Manager: {hiring_manager}
Company Info: {company_info}
Job Description: {job_description}

TONE: {tone_instruction}

REQUIREMENTS:
1. Write a complete, professional cover letter
2. Address it to the hiring manager or company
3. Write 3-4 paragraphs separated by blank lines:
   - Opening: Express interest and briefly state qualifications
   - Body 1-2: Highlight relevant experience and skills that match the job
   - Closing: Express enthusiasm and next steps
4. Match skills and experience to the job requirements
5. Use specific examples from work experience
6. Keep it to 250-400 words
7. Include proper salutation and closing
8. Do NOT include the date; it is added when the letter is rendered

{grounding_instruction}
{ats_instruction}

Generate the complete cover letter text."#;

/// Job match analysis prompt.
/// Replace: {skills}, {experience}, {job_description}, {json_only_instruction}
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the match between this candidate and job requirements.

CANDIDATE SKILLS: {skills}
CANDIDATE EXPERIENCE: {experience}

JOB DESCRIPTION: {job_description}

Provide analysis in JSON format:
{
    "match_percentage": number_between_0_and_100,
    "matching_skills": ["skill1", "skill2"],
    "missing_skills": ["skill1", "skill2"],
    "strengths": ["strength1", "strength2"],
    "recommendations": ["recommendation1", "recommendation2"]
}

{json_only_instruction}"#;

/// Resume improvement suggestions prompt.
/// Replace: {resume_json}, {job_description}, {json_only_instruction}
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide 3-5 specific improvement suggestions.

Resume Content: {resume_json}
Target Job Description: {job_description}

Provide suggestions for:
1. Missing keywords for ATS optimization
2. Areas where more quantifiable results could be added
3. Skills or experiences that should be emphasized
4. Overall structure or formatting improvements

Return suggestions as a JSON object:
{"suggestions": ["suggestion 1", "suggestion 2", "suggestion 3"]}

{json_only_instruction}"#;

/// Industry customization prompt for an existing cover letter.
/// Replace: {industry}, {cover_letter}
pub const CUSTOMIZE_PROMPT_TEMPLATE: &str = r#"Customize this cover letter for the {industry} industry.
Adjust language, terminology, and emphasis to better fit industry expectations.

Original Cover Letter:
{cover_letter}

Industry: {industry}

Make appropriate adjustments while keeping the core content, facts, and paragraph structure.
Return only the customized cover letter text."#;
