use crate::scroll::SectionId;

pub const ABOUT: SectionId = SectionId::from_static("about");
pub const SKILLS: SectionId = SectionId::from_static("skills");
pub const PROJECTS: SectionId = SectionId::from_static("projects");
pub const CONTACT: SectionId = SectionId::from_static("contact");

pub const OWNER_NAME: &str = "Lucas Sekwati";
pub const CV_PATH: &str = "/Lucas_Sekwati_-CV.pdf";
pub const CV_DOWNLOAD_NAME: &str = "Lucas_Sekwati_CV.pdf";
pub const CERTIFICATE_URL: &str = "https://intranet.alxswe.com/certificates/pHRhXF93Mc";

pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
}

pub static NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        id: SectionId::HEADER,
        label: "Home",
    },
    NavItem {
        id: ABOUT,
        label: "About Me",
    },
    NavItem {
        id: SKILLS,
        label: "Skills",
    },
    NavItem {
        id: PROJECTS,
        label: "Projects",
    },
    NavItem {
        id: CONTACT,
        label: "Contact",
    },
];

pub static ABOUT_PARAGRAPHS: [&str; 3] = [
    "In December 2022, I took a major step and joined the ALX Software Engineering Program, \
     a 12-month intensive course that began in February 2023. Balancing full-time work with \
     rigorous studies was challenging, requiring sacrifices, long nights, and perseverance. \
     In November 2024 that work paid off and I graduated.",
    "Before moving into tech I built a strong foundation in retail, honing problem-solving, \
     adaptability, and customer empathy. As a software developer I apply those strengths to \
     user-focused solutions.",
    "I specialize in building dynamic front-end interfaces and efficient back-end systems, \
     bridging functionality and creativity to deliver impactful applications.",
];

pub static EXPERIENCE: [&str; 2] = [
    "Developed hands-on projects using JavaScript, Node.js, Express.js, MongoDB, SQL, and React.js.",
    "Open to software development roles, internships, and freelance opportunities.",
];

pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
}

pub struct SkillCategory {
    pub title: &'static str,
    pub class: &'static str,
    pub skills: &'static [Skill],
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Frontend",
        class: "skills-frontend",
        skills: &[
            Skill { name: "HTML5", icon: "/assets/html5.svg" },
            Skill { name: "CSS3", icon: "/assets/css3.svg" },
            Skill { name: "JavaScript", icon: "/assets/javascript.svg" },
            Skill { name: "React", icon: "/assets/react.svg" },
            Skill { name: "Next.js", icon: "/assets/nextjs.svg" },
            Skill { name: "Tailwind CSS", icon: "/assets/tailwind.svg" },
        ],
    },
    SkillCategory {
        title: "Backend",
        class: "skills-backend",
        skills: &[
            Skill { name: "Node.js", icon: "/assets/nodejs.svg" },
            Skill { name: "Express.js", icon: "/assets/express.svg" },
            Skill { name: "MongoDB", icon: "/assets/mongodb.svg" },
            Skill { name: "MySQL", icon: "/assets/mysql.svg" },
            Skill { name: "Python", icon: "/assets/python.svg" },
        ],
    },
    SkillCategory {
        title: "Other Tools",
        class: "skills-tools",
        skills: &[
            Skill { name: "GitHub", icon: "/assets/github.svg" },
            Skill { name: "Docker", icon: "/assets/docker.svg" },
            Skill { name: "Firebase", icon: "/assets/firebase.svg" },
            Skill { name: "Postman", icon: "/assets/postman.svg" },
            Skill { name: "Linux", icon: "/assets/linux.svg" },
            Skill { name: "VS Code", icon: "/assets/visualstudio.svg" },
        ],
    },
];

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub images: &'static [&'static str],
    pub tech_stack: &'static [&'static str],
    pub github: &'static str,
    pub design_tool: Option<&'static str>,
}

pub const PROJECT_LIST: &[Project] = &[
    Project {
        title: "FirstCare Healthcare Appointment Booking",
        description: "A full-stack platform connecting patients to healthcare professionals \
                      through appointment scheduling and management.",
        features: &[
            "User Authentication: Secure user registration and login via Firebase.",
            "Provider Profiles: Healthcare provider details with specialties and availability.",
            "Appointment Management: Book, view, reschedule, and cancel appointments.",
        ],
        images: &[
            "/assets/firstcare1.png",
            "/assets/firstcare2.png",
            "/assets/firstcare3.png",
        ],
        tech_stack: &[
            "React (Next.js)",
            "Adobe XD",
            "Firebase",
            "Tailwind CSS",
            "Express.js",
            "Node.js",
            "MongoDB",
            "GitHub",
        ],
        github: "https://github.com/mlu1432/Healthcare-Appointment-Booking-System",
        design_tool: Some("https://xd.adobe.com/view/14a7d2a6-c217-45bd-a60a-c48b72ecb24f-41f4/"),
    },
    Project {
        title: "SentinelShield Mobile App",
        description: "A mobile application providing emergency assistance by combining location \
                      tracking with real-time communication to predefined emergency contacts.",
        features: &[
            "User Authentication: Secure user registration and login via Firebase.",
            "Location Services: Real-time location updates for responders.",
            "Emergency Requests: Send location and predefined messages during emergencies.",
        ],
        images: &["/assets/1pic.jpg", "/assets/4pic.jpg", "/assets/5pic.jpg"],
        tech_stack: &[
            "React",
            "Expo",
            "Figma",
            "React Native Stylesheet",
            "GitHub",
            "Express.js",
            "Node.js",
            "Firebase",
        ],
        github: "https://github.com/mlu1432/sentinel_shield_App",
        design_tool: Some(
            "https://www.figma.com/design/e8Nv8Lu5r7Ac6PA99yKxqq/SentinelShield?t=0gSfmTiFfW2HUHIT-1",
        ),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn navigation_starts_at_header_and_ids_are_unique() {
        assert_eq!(NAV_ITEMS[0].id, SectionId::HEADER);

        let ids: HashSet<_> = NAV_ITEMS.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), NAV_ITEMS.len());
    }

    #[test]
    fn every_project_has_a_cover_image_and_repository() {
        for project in PROJECT_LIST {
            assert!(!project.images.is_empty(), "{} has no images", project.title);
            assert!(project.github.starts_with("https://github.com/"));
        }
    }
}
