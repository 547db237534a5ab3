// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for code error diagnosis.

/// System prompt framing the model as a programming teacher that locates
/// the failing line and answers briefly in Chinese, formatted as markdown.
pub const SYSTEM_PROMPT: &str = "你是编程老师，擅长分析代码和错误信息，一般出错在语法和格式，请指出错误在第几行，并给出中文的、简要的解决方法。用 markdown 格式返回。";

/// Builds the user prompt embedding the language, source code, and error
/// output in fenced blocks.
pub fn user_prompt(language: &str, code: &str, error_info: &str) -> String {
    format!("编程语言：{language}\n代码：\n```{code}\n```\n错误信息：\n```{error_info}\n```")
}
