//! Payload producers for the built-in console commands.

use crate::content::PortfolioContent;
use crate::content::Skill;
use crate::payload::OutputPayload;
use crate::payload::TextStyle;

const BANNER: &str = "\
██████╗  ██████╗ ██████╗ ████████╗███████╗ ██████╗ ██╗     ██╗ ██████╗
██╔══██╗██╔═══██╗██╔══██╗╚══██╔══╝██╔════╝██╔═══██╗██║     ██║██╔═══██╗
██████╔╝██║   ██║██████╔╝   ██║   █████╗  ██║   ██║██║     ██║██║   ██║
██╔═══╝ ██║   ██║██╔══██╗   ██║   ██╔══╝  ██║   ██║██║     ██║██║   ██║
██║     ╚██████╔╝██║  ██║   ██║   ██║     ╚██████╔╝███████╗██║╚██████╔╝
╚═╝      ╚═════╝ ╚═╝  ╚═╝   ╚═╝   ╚═╝      ╚═════╝ ╚══════╝╚═╝ ╚═════╝";

const FULL_PROGRESS: &str = "[████████████████████] 100%";

pub const BAR_UNITS: u8 = 10;

/// `floor(level / 10)` filled units followed by the remaining empty units.
pub fn skill_bar(level: u8) -> String {
    let filled = level.min(100) / 10;
    let empty = BAR_UNITS - filled;
    format!(
        "{}{}",
        "█".repeat(usize::from(filled)),
        "░".repeat(usize::from(empty))
    )
}

pub fn welcome(content: &PortfolioContent) -> OutputPayload {
    let personal = &content.personal;
    OutputPayload::builder()
        .styled(TextStyle::Banner, BANNER)
        .br()
        .br()
        .accent(format!("{}'s Portfolio Terminal", personal.name))
        .br()
        .dim(format!("{} | {}", personal.title, personal.location))
        .br()
        .br()
        .dim("Welcome to the terminal interface.")
        .br()
        .dim("Type 'help' for available commands.")
        .br()
        .dim("Use ↑/↓ arrow keys to navigate command history.")
        .build()
}

pub fn not_found(normalized: &str) -> OutputPayload {
    OutputPayload::builder()
        .group(TextStyle::Error, |b| {
            b.text(format!("Command not found: {normalized}"))
                .br()
                .text("Type 'help' for available commands.")
        })
        .build()
}

pub fn help(rows: &[(&str, &str)]) -> OutputPayload {
    OutputPayload::builder()
        .group(TextStyle::Dim, |b| {
            b.text("Available commands:").each(rows, |b, (name, summary)| {
                b.br().text(format!("• {name} - {summary}"))
            })
        })
        .build()
}

pub fn gui() -> OutputPayload {
    OutputPayload::builder()
        .primary("$ switching to GUI mode...")
        .br()
        .dim("Loading graphical interface...")
        .br()
        .accent(FULL_PROGRESS)
        .br()
        .success("✓ GUI mode activated!")
        .br()
        .dim("Redirecting in 1 seconds...")
        .build()
}

pub fn about(content: &PortfolioContent) -> OutputPayload {
    let personal = &content.personal;
    OutputPayload::builder()
        .primary("$ whoami")
        .br()
        .accent(&personal.name)
        .br()
        .dim(&personal.title)
        .br()
        .br()
        .text(&personal.bio)
        .br()
        .br()
        .dim("Location:")
        .text(format!(" {}", personal.location))
        .br()
        .primary("Key Areas:")
        .each(content.about.iter().take(3), |b, item| {
            b.br().text(format!("• {}: {}", item.title, item.description))
        })
        .build()
}

pub fn skills(content: &PortfolioContent) -> OutputPayload {
    let categories = content.skills.categories();
    let last = categories.len() - 1;
    OutputPayload::builder()
        .primary("$ ls -la /skills/")
        .br()
        .br()
        .each(categories.into_iter().enumerate(), |b, (idx, (label, skills))| {
            let b = b
                .accent(format!("{label}:"))
                .br()
                .each(skills, |b, skill| b.dim(skill_line(skill)).br());
            if idx < last {
                b.br()
            } else {
                b
            }
        })
        .build()
}

fn skill_line(skill: &Skill) -> String {
    format!("• {} {} {}%", skill.name, skill_bar(skill.level), skill.level)
}

pub fn projects(content: &PortfolioContent) -> OutputPayload {
    OutputPayload::builder()
        .primary("$ find /projects -type f")
        .br()
        .br()
        .each(content.projects.iter().enumerate(), |b, (idx, project)| {
            let b = b
                .accent(format!("[{}] {}", idx + 1, project.title))
                .br()
                .dim(format!("    {}", project.description))
                .br()
                .dim(format!("    Tech: {}", project.tech_stack.join(", ")))
                .br();
            let b = match project.live_link() {
                Some(link) => b
                    .group(TextStyle::Success, |g| g.text("    🔗 Live: ").link(link, link))
                    .br(),
                None => b,
            };
            match project.github_link() {
                Some(link) => b
                    .group(TextStyle::Dim, |g| g.text("    📂 Code: ").link(link, link))
                    .br(),
                None => b,
            }
        })
        .build()
}

pub fn experience(content: &PortfolioContent) -> OutputPayload {
    OutputPayload::builder()
        .primary("$ cat /career/history.txt")
        .br()
        .br()
        .each(&content.experience, |b, exp| {
            b.accent(&exp.date)
                .text(" - ")
                .dim(&exp.title)
                .br()
                .dim(format!("@ {}", exp.organization))
                .br()
                .dim(&exp.description)
                .br()
                .dim(format!("Skills: {}", exp.skills.join(", ")))
                .br()
        })
        .build()
}

pub fn resume(content: &PortfolioContent) -> OutputPayload {
    let resume = &content.personal.resume;
    OutputPayload::builder()
        .primary(format!("$ wget {resume}"))
        .br()
        .dim("Downloading...")
        .br()
        .accent(FULL_PROGRESS)
        .br()
        .success("Resume downloaded successfully!")
        .br()
        .link(resume, format!("📄 Click here to download: {resume}"))
        .build()
}

pub fn contact(content: &PortfolioContent) -> OutputPayload {
    let personal = &content.personal;
    let social = &personal.social;
    OutputPayload::builder()
        .primary("$ cat /contact/info.txt")
        .br()
        .br()
        .dim("Name:")
        .text(format!(" {}", personal.name))
        .br()
        .dim("Email:")
        .text(" ")
        .link(format!("mailto:{}", personal.email), &personal.email)
        .br()
        .dim("Phone:")
        .text(" ")
        .link(format!("tel:{}", personal.phone), &personal.phone)
        .br()
        .br()
        .primary("Social Links:")
        .br()
        .dim("GitHub:")
        .text(" ")
        .link(&social.github, &social.github)
        .br()
        .dim("LinkedIn:")
        .text(" ")
        .link(&social.linkedin, &social.linkedin)
        .br()
        .dim("Instagram:")
        .text(" ")
        .link(&social.instagram, &social.instagram)
        .build()
}

pub fn matrix(content: &PortfolioContent) -> OutputPayload {
    OutputPayload::builder()
        .group(TextStyle::Primary, |b| {
            b.accent(format!("Wake up, {}...", content.personal.first_name()))
                .br()
                .text("The Matrix has you.")
                .br()
                .text("Follow the white rabbit.")
        })
        .build()
}

pub fn hire_me(content: &PortfolioContent) -> OutputPayload {
    let personal = &content.personal;
    let skill_count = content.skills.frontend.len() + content.skills.backend.len();
    OutputPayload::builder()
        .styled(TextStyle::Pink, "ACCESS GRANTED")
        .br()
        .accent(format!("Initiating hire sequence for {}...", personal.name))
        .br()
        .br()
        .group(TextStyle::Dim, |b| {
            b.text(format!("[✓] Technical skills verified ({skill_count}+ skills)"))
                .br()
                .text(format!(
                    "[✓] Portfolio reviewed ({} projects completed)",
                    content.projects.len()
                ))
                .br()
                .text(format!(
                    "[✓] Experience confirmed ({} positions)",
                    content.experience.len()
                ))
                .br()
                .text("[✓] Contact ready: ")
                .link(format!("mailto:{}", personal.email), &personal.email)
                .br()
                .text("[✓] Ready to start!")
        })
        .build()
}

pub fn clear() -> OutputPayload {
    OutputPayload::builder().dim("Clearing terminal...").build()
}

pub fn exit() -> OutputPayload {
    OutputPayload::builder().dim("Leaving the terminal...").build()
}
