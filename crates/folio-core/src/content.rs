use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported content format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("skill `{name}` has level {level}, expected 0-100")]
    InvalidSkillLevel { name: String, level: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub instagram: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub social: SocialLinks,
    /// Public path or URL of the downloadable resume.
    pub resume: String,
}

impl PersonalInfo {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutHighlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub frontend: Vec<Skill>,
    pub backend: Vec<Skill>,
    pub database: Vec<Skill>,
    pub tools: Vec<Skill>,
}

impl SkillSet {
    /// Categories in display order.
    pub fn categories(&self) -> [(&'static str, &[Skill]); 4] {
        [
            ("Frontend", self.frontend.as_slice()),
            ("Backend", self.backend.as_slice()),
            ("Database", self.database.as_slice()),
            ("Tools", self.tools.as_slice()),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.frontend
            .iter()
            .chain(self.backend.iter())
            .chain(self.database.iter())
            .chain(self.tools.iter())
    }
}

/// Keys follow the web data file (`techStack`, `githubLink`, `liveLink`);
/// snake_case spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default, alias = "tech_stack")]
    pub tech_stack: Vec<String>,
    #[serde(default, alias = "github_link")]
    pub github_link: Option<String>,
    #[serde(default, alias = "live_link")]
    pub live_link: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Project {
    pub fn live_link(&self) -> Option<&str> {
        non_blank(self.live_link.as_deref())
    }

    pub fn github_link(&self) -> Option<&str> {
        non_blank(self.github_link.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub date: String,
    pub title: String,
    pub organization: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Read-only portfolio data consumed by the command registry and the
/// overview screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioContent {
    #[serde(alias = "personalInfo")]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub about: Vec<AboutHighlight>,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

impl PortfolioContent {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let content: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&raw).map_err(|source| ContentError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&raw).map_err(|source| ContentError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ContentError::UnsupportedFormat(path.to_path_buf())),
        };
        content.validate()?;
        tracing::debug!(path = %path.display(), projects = content.projects.len(), "loaded portfolio content");
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if let Some(skill) = self.skills.iter().find(|skill| skill.level > 100) {
            return Err(ContentError::InvalidSkillLevel {
                name: skill.name.clone(),
                level: skill.level,
            });
        }
        Ok(())
    }

    pub fn sample() -> Self {
        Self {
            personal: PersonalInfo {
                name: "Yadnyesh Borole".to_string(),
                title: "Full-Stack Developer".to_string(),
                bio: "Full-stack developer passionate about building modern, high-performance web applications with React, Next.js, Node.js and AI-powered features. I focus on clean UI/UX, automation, and scalable engineering.".to_string(),
                location: "India".to_string(),
                email: "yadnyeshsunilborole@gmail.com".to_string(),
                phone: "+91-8999617312".to_string(),
                social: SocialLinks {
                    github: "https://github.com/ygstudio-game/".to_string(),
                    linkedin: "https://www.linkedin.com/in/yadnyesh-borole-51aa0532a/".to_string(),
                    instagram: "https://www.instagram.com/yadnyeshborole/".to_string(),
                },
                resume: "/Yadnyesh_Borole_Resume.pdf".to_string(),
            },
            about: vec![
                highlight(
                    "Who I Am",
                    "A passionate full-stack developer who loves building clean, modern, and intelligent applications using React, Next.js, Node.js, and AI integrations. I turn ideas into optimized digital experiences.",
                ),
                highlight(
                    "Current Focus",
                    "Working on AI-integrated applications, smart health platforms, automation tools, and improving deep UI/UX practices with animation-heavy React experiences.",
                ),
                highlight(
                    "Experience",
                    "2+ years of experience building web apps using React, Next.js, Node.js, and cloud deployments. Worked with startups, events, and personal SaaS projects.",
                ),
                highlight(
                    "Tech Stack",
                    "React, Next.js, JavaScript, TypeScript, Node.js, Tailwind, Java, MongoDB, PostgreSQL, Botpress, and AI tools (OpenAI, Gemini, HuggingFace).",
                ),
                highlight(
                    "What I Do",
                    "Full-stack apps, UI/UX design, chatbot development, automation tools, portfolio systems, and AI-powered dashboards with real-time interaction.",
                ),
                highlight(
                    "Currently Learning",
                    "Advanced animations, design systems, WebGL, Framer Motion, system design, and building SaaS-ready architectures.",
                ),
            ],
            skills: SkillSet {
                frontend: vec![
                    Skill::new("React", 95),
                    Skill::new("Next.js", 90),
                    Skill::new("JavaScript", 95),
                    Skill::new("TypeScript", 85),
                    Skill::new("Tailwind CSS", 90),
                    Skill::new("HTML/CSS", 95),
                ],
                backend: vec![
                    Skill::new("Node.js", 85),
                    Skill::new("Express", 80),
                    Skill::new("Java", 90),
                    Skill::new("Python", 70),
                ],
                database: vec![Skill::new("MongoDB", 80)],
                tools: vec![
                    Skill::new("Git", 90),
                    Skill::new("Docker", 40),
                    Skill::new("AWS", 40),
                    Skill::new("Vercel", 90),
                ],
            },
            projects: vec![
                Project {
                    id: 1,
                    title: "Printly – Smart Print Management System".to_string(),
                    description: "Desktop and web-based print management system built with Electron and MERN stack to handle print orders, job tracking, payments, and shop workflow automation.".to_string(),
                    tech_stack: strings(&["Electron", "React", "Node.js", "Express", "MongoDB", "Tailwind CSS"]),
                    github_link: Some("https://github.com/ygstudio-game/Printly".to_string()),
                    live_link: None,
                    category: Some("Desktop and Web App".to_string()),
                },
                Project {
                    id: 2,
                    title: "Farm2Factory – Farmer to Factory Platform".to_string(),
                    description: "End-to-end digital bridge between farmers and factories with separate frontends, secure backend APIs, and real-time notifications for crop orders and contracts.".to_string(),
                    tech_stack: strings(&["React", "Node.js", "Express", "MongoDB", "Tailwind CSS", "WebSockets"]),
                    github_link: Some("https://github.com/ygstudio-game/Fram2Factory".to_string()),
                    live_link: Some("https://fram2factory.vercel.app/".to_string()),
                    category: Some("Full-Stack".to_string()),
                },
                Project {
                    id: 3,
                    title: "Roborashtra 2K26 Event Website".to_string(),
                    description: "Official showcase website for Roborashtra 2K26 built with Next.js and Tailwind CSS, highlighting event information, rulebooks, team, and contact details in a modern responsive UI.".to_string(),
                    tech_stack: strings(&["Next.js", "TypeScript", "Tailwind CSS"]),
                    github_link: Some("https://github.com/Shreyapatil2142/Roborashtra2K26".to_string()),
                    live_link: Some("https://www.roborashtra.com".to_string()),
                    category: Some("UI/UX".to_string()),
                },
                Project {
                    id: 4,
                    title: "BreatheSafeAI Platform".to_string(),
                    description: "AI-powered health and environmental risk intelligence platform that uses real-time AQI and weather data to predict health risks, detect anomalies, and provide interactive visual dashboards.".to_string(),
                    tech_stack: strings(&["React", "Node.js", "Express", "MongoDB", "Python", "AI/ML"]),
                    github_link: Some("https://github.com/Anup2006/BreatheSafe".to_string()),
                    live_link: Some("https://breathe-safe-s2xn.vercel.app/".to_string()),
                    category: Some("AI".to_string()),
                },
            ],
            experience: vec![
                Experience {
                    id: 1,
                    date: "2023 - Present".to_string(),
                    title: "Full-Stack Developer (Freelance & Personal Projects)".to_string(),
                    organization: "Self-Directed".to_string(),
                    description: "Building full-stack and AI-powered applications, focusing on production-ready architecture, UI/UX, and automation.".to_string(),
                    skills: strings(&["React", "Next.js", "Node.js", "MongoDB", "TypeScript", "AI APIs"]),
                },
                Experience {
                    id: 2,
                    date: "2022 - 2023".to_string(),
                    title: "Frontend & UI Engineer (Student Projects)".to_string(),
                    organization: "College & Hackathon Projects".to_string(),
                    description: "Led frontend development for multiple academic and hackathon projects with a focus on modern React-based UIs.".to_string(),
                    skills: strings(&["React", "Tailwind CSS", "Framer Motion", "JavaScript"]),
                },
            ],
        }
    }
}

fn highlight(title: &str, description: &str) -> AboutHighlight {
    AboutHighlight {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sample_content_is_valid() {
        let content = PortfolioContent::sample();
        assert!(content.validate().is_ok());
        assert_eq!(content.personal.first_name(), "Yadnyesh");
        assert_eq!(content.skills.iter().count(), 15);
    }

    #[test]
    fn blank_project_links_are_treated_as_missing() {
        let mut project = PortfolioContent::sample().projects[1].clone();
        project.live_link = Some("  ".to_string());
        assert_eq!(project.live_link(), None);
        assert_eq!(
            project.github_link(),
            Some("https://github.com/ygstudio-game/Fram2Factory")
        );
    }

    #[test]
    fn loads_yaml_and_json_with_matching_results() {
        let content = PortfolioContent::sample();
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("portfolio.yaml");
        fs::write(&yaml_path, serde_yaml::to_string(&content).unwrap()).unwrap();
        let json_path = dir.path().join("portfolio.json");
        fs::write(&json_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

        assert_eq!(PortfolioContent::load(&yaml_path).unwrap(), content);
        assert_eq!(PortfolioContent::load(&json_path).unwrap(), content);
    }

    #[test]
    fn minimal_yaml_fills_optional_sections() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            r#"
personal:
  name: Ada Lovelace
  title: Analyst
  bio: Notes on the engine.
  location: London
  email: ada@example.com
  phone: "+44-0000"
  social:
    github: https://github.com/ada
    linkedin: https://linkedin.com/in/ada
    instagram: https://instagram.com/ada
  resume: /ada.pdf
skills:
  backend:
    - name: Rust
      level: 99
"#
        )
        .unwrap();

        let content = PortfolioContent::load(file.path()).unwrap();
        assert_eq!(content.skills.backend, vec![Skill::new("Rust", 99)]);
        assert!(content.projects.is_empty());
        assert!(content.skills.frontend.is_empty());
    }

    #[test]
    fn project_keys_accept_web_and_snake_case_spellings() {
        let camel: Project = serde_json::from_str(
            r#"{"id":1,"title":"Printly","description":"Print queue","techStack":["Rust"],"githubLink":"https://github.com/x/printly","liveLink":""}"#,
        )
        .unwrap();
        assert_eq!(camel.tech_stack, vec!["Rust".to_string()]);
        assert_eq!(camel.github_link(), Some("https://github.com/x/printly"));
        assert_eq!(camel.live_link(), None);

        let snake: Project = serde_yaml::from_str(
            "id: 1\ntitle: Printly\ndescription: Print queue\ntech_stack: [Rust]\ngithub_link: https://github.com/x/printly\nlive_link: \"\"\n",
        )
        .unwrap();
        assert_eq!(snake, camel);

        let written = serde_json::to_string(&camel).unwrap();
        assert!(written.contains("\"techStack\""), "{written}");
    }

    #[test]
    fn rejects_unknown_extension_and_bad_levels() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("portfolio.txt");
        fs::write(&txt, "").unwrap();
        assert!(matches!(
            PortfolioContent::load(&txt),
            Err(ContentError::UnsupportedFormat(_))
        ));

        let mut content = PortfolioContent::sample();
        content.skills.tools.push(Skill::new("Overclock", 120));
        assert!(matches!(
            content.validate(),
            Err(ContentError::InvalidSkillLevel { level: 120, .. })
        ));
    }
}
