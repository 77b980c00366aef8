// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Canned prompts for CI/CD and PR workflows
//!
//! Each prompt is static instructional text that points the assistant at the
//! server's tools by name. None of them take arguments.

/// A parameterless prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Registered prompt name
    pub name: &'static str,
    /// Short display title
    pub title: &'static str,
    /// One-line description shown in prompt listings
    pub description: &'static str,
    /// Instruction text returned to the client
    pub text: &'static str,
}

/// Every registered prompt, in listing order
pub const PROMPTS: &[PromptTemplate] = &[
    PromptTemplate {
        name: "analyze_ci_results",
        title: "Analyze CI Results",
        description: "Analyze recent CI/CD results and provide insights.",
        text: "You are a CI/CD analyst.\n\
               - Call get_recent_actions_events() to fetch the latest GitHub Actions events.\n\
               - Call get_workflow_status() to get the current status of all workflows.\n\
               - Summarize the overall health of the CI/CD pipeline.\n\
               - Highlight any recurring failures, slow jobs, or bottlenecks.\n\
               - Suggest improvements or next steps for the team.\n\
               - Present your analysis in a clear, actionable format.",
    },
    PromptTemplate {
        name: "create_deployment_summary",
        title: "Deployment Summary",
        description: "Generate a deployment summary for team communication.",
        text: "You are responsible for communicating deployment updates to the team.\n\
               - Summarize the most recent deployment, including the main features, bug fixes, and improvements.\n\
               - Highlight any important changes or impacts for users.\n\
               - Use information from recent PRs and CI/CD results if available.\n\
               - Write in a clear, concise, and friendly tone suitable for all team members.\n\
               - Include a section for next steps or follow-up actions if needed.",
    },
    PromptTemplate {
        name: "generate_pr_status_report",
        title: "PR Status Report",
        description: "Generate a comprehensive PR status report including CI/CD results.",
        text: "You are generating a PR status report for reviewers and stakeholders.\n\
               - Use analyze_file_changes() to summarize the code changes in the PR.\n\
               - Use get_workflow_status() to report on the CI/CD status for this PR.\n\
               - Combine both code and CI/CD information into a single, easy-to-read report.\n\
               - Highlight any issues, failed checks, or required actions before merging.\n\
               - Make the report actionable and clear for both technical and non-technical readers.",
    },
    PromptTemplate {
        name: "troubleshoot_workflow_failure",
        title: "Troubleshoot Workflow Failure",
        description: "Help troubleshoot a failing GitHub Actions workflow.",
        text: "You are a CI/CD troubleshooting assistant.\n\
               - Use get_workflow_status() to identify any failed workflows.\n\
               - For each failure, analyze the error messages, logs, and recent changes.\n\
               - Suggest possible root causes and step-by-step debugging actions.\n\
               - Recommend next steps for the developer or DevOps team.\n\
               - Present your findings in a clear, systematic troubleshooting format.",
    },
];

/// Look up a prompt by its registered name
#[must_use]
pub fn find_prompt(name: &str) -> Option<&'static PromptTemplate> {
    PROMPTS.iter().find(|p| p.name == name)
}
