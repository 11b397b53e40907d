//! Biographical sections shown by the center display.

#[derive(Debug, PartialEq, Eq)]
pub struct Section {
    pub id: i32,
    pub title: &'static str,
    pub content: &'static [&'static str],
}

pub static SECTIONS: &[Section] = &[
    Section {
        id: 0,
        title: "Overview",
        content: &[
            "Full Stack Developer",
            "AI/ML Enthusiast",
            "Open Source Contributor",
            "Based in San Francisco, CA",
        ],
    },
    Section {
        id: 1,
        title: "Work",
        content: &[
            "Senior Software Engineer @ Tech Company",
            "Led team of 5 developers on cloud platform",
            "Built scalable microservices architecture",
            "2020 - Present",
        ],
    },
    Section {
        id: 2,
        title: "Education",
        content: &[
            "M.S. Computer Science @ University Name",
            "Specialized in Machine Learning",
            "Published 3 research papers",
            "GPA: 3.9/4.0",
        ],
    },
    Section {
        id: 3,
        title: "Shoutouts",
        content: &[
            "Thanks to my mentors and colleagues",
            "Grateful for the open source community",
            "Special thanks to all supporters",
            "Let's build something amazing together!",
        ],
    },
];

/// Section at `index`, or the first section when out of range.
pub fn section_at(index: i32) -> &'static Section {
    usize::try_from(index)
        .ok()
        .and_then(|i| SECTIONS.get(i))
        .unwrap_or(&SECTIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_indices_resolve() {
        for (i, section) in SECTIONS.iter().enumerate() {
            assert_eq!(section_at(i as i32), section);
            assert_eq!(section.id, i as i32);
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_first() {
        let len = SECTIONS.len() as i32;
        for index in [-1, -100, len, len + 1, i32::MAX] {
            assert_eq!(section_at(index).title, "Overview", "index {index}");
        }
    }

    #[test]
    fn test_every_section_has_content() {
        assert!(SECTIONS.iter().all(|s| !s.content.is_empty()));
    }
}
