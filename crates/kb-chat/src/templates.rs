//! Canned answers used when retrieval finds nothing.
//!
//! Lookup is keyed by `(Category, ResponseFormat)`; every category has a
//! fallback body for formats it does not specialise.

use serde::{Deserialize, Serialize};

use crate::category::Category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ResponseFormat {
    Summary,
    #[default]
    Detailed,
    List,
    Essay,
}

impl ResponseFormat {
    /// Case-insensitive; anything unrecognised is `Detailed`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "summary" => ResponseFormat::Summary,
            "list" => ResponseFormat::List,
            "essay" => ResponseFormat::Essay,
            _ => ResponseFormat::Detailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Summary => "summary",
            ResponseFormat::Detailed => "detailed",
            ResponseFormat::List => "list",
            ResponseFormat::Essay => "essay",
        }
    }
}

impl From<String> for ResponseFormat {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer for `category` in `format`. `topic` is the extracted subject, or
/// the character name for character categories.
pub fn respond(category: Category, format: ResponseFormat, topic: &str) -> String {
    use ResponseFormat::*;

    match category {
        Category::FunQuestion => fun(topic),
        Category::Comparative => match format {
            Summary => format!("Comparison: {topic}. Key differences and similarities."),
            Detailed => format!(
                "COMPARISON: {}\n\nHow the two sides differ in design, purpose and capability, \
                 and where fiction and real engineering part ways.",
                topic.to_uppercase()
            ),
            _ => format!("A comparison of {topic}, contrasting fictional concepts with real-world systems."),
        },
        Category::SpecificAndroid => android_character(topic, format),
        Category::SpecificRobot => robot_character(topic, format),
        Category::FictionalAndroids => match format {
            Summary => {
                "Fictional androids: human-like artificial beings such as Data, Bishop, Roy Batty and Ava.".into()
            }
            List => bullets(
                "FICTIONAL ANDROIDS",
                &[
                    "Data (Star Trek): android officer seeking humanity",
                    "Bishop (Aliens): loyal synthetic and medic",
                    "Roy Batty (Blade Runner): Nexus-6 replicant",
                    "Ava (Ex Machina): AI built to pass the Turing test",
                    "Dolores (Westworld): host awakening to consciousness",
                    "Connor (Detroit: Become Human): detective android",
                ],
            ),
            Essay => "Fictional androids blur the line between machine and person. Stories about them ask \
                      what consciousness is, whether an artificial mind has rights, and what we owe the \
                      things we build. Data wants to become human; Roy Batty wants more life; Ava wants out."
                .into(),
            Detailed => "FICTIONAL ANDROIDS\n\n\
                         STAR TREK: Data, Lore\n\
                         ALIEN: Ash, Bishop, David, Walter\n\
                         BLADE RUNNER: Roy Batty, Rachael, Pris\n\
                         WESTWORLD: Dolores, Maeve, Bernard\n\
                         EX MACHINA: Ava, Kyoko\n\
                         DETROIT: BECOME HUMAN: Connor, Markus, Kara"
                .into(),
        },
        Category::FictionalRobots => match format {
            Summary => "Fictional robots: iconic machines such as C-3PO, R2-D2, WALL-E and the Terminator.".into(),
            _ => bullets(
                "FICTIONAL ROBOTS",
                &[
                    "C-3PO (Star Wars): protocol droid",
                    "R2-D2 (Star Wars): astromech droid",
                    "WALL-E (Pixar): waste collector with a personality",
                    "T-800 (Terminator): cybernetic infiltrator",
                    "Optimus Prime (Transformers): Autobot leader",
                    "Bender (Futurama): bending unit",
                ],
            ),
        },
        Category::Gundam => match format {
            Summary => "Gundam: the mecha anime franchise whose mobile suits shaped giant-robot fiction.".into(),
            List => bullets(
                "GUNDAM MOBILE SUITS",
                &[
                    "RX-78-2 Gundam: the original Federation prototype",
                    "Zaku II: Zeon's mass-production suit",
                    "Wing Gundam Zero",
                    "Strike Freedom Gundam",
                    "Barbatos",
                ],
            ),
            _ => "GUNDAM\n\nMobile Suit Gundam (1979) recast giant robots as military hardware: mass-produced, \
                  maintained and piloted. The franchise spans dozens of series and the Gunpla model kits, and \
                  it remains a reference point for humanoid robot design."
                .into(),
        },
        Category::Androids => match format {
            Summary => "Androids: robots built to resemble and interact with humans.".into(),
            List => bullets(
                "ANDROID TYPES",
                &["Companion", "Service and hospitality", "Healthcare", "Research", "Entertainment"],
            ),
            _ => "ANDROIDS\n\nHumanoid robots that prioritise human-like appearance and social interaction. \
                  They combine artificial skin, fine actuators, speech and vision, and face the uncanny valley."
                .into(),
        },
        Category::Robotics => match format {
            Summary => "Robotics: engineering machines that sense, decide and act.".into(),
            List => bullets(
                "ROBOTICS APPLICATIONS",
                &["Manufacturing", "Healthcare and surgery", "Space exploration", "Agriculture", "Logistics"],
            ),
            _ => "ROBOTICS\n\nRobotics joins mechanical engineering, electronics and software. A robot senses \
                  its environment, plans, and acts through actuators; the field ranges from factory arms to \
                  planetary rovers."
                .into(),
        },
        Category::Ai => match format {
            Summary => "Artificial intelligence: machines performing tasks that call for human-like judgment.".into(),
            List => bullets(
                "AI TECHNOLOGIES",
                &["Machine learning", "Deep learning", "Natural language processing", "Computer vision"],
            ),
            _ => "ARTIFICIAL INTELLIGENCE\n\nModern AI learns patterns from data rather than following \
                  hand-written rules. Deep neural networks drive perception, language and planning systems."
                .into(),
        },
        Category::Generic => generic(topic, format),
    }
}

fn fun(topic: &str) -> String {
    let t = topic.to_lowercase();
    if t.contains("joke") || t.contains("funny") {
        "Why don't robots panic? Nerves of steel.".into()
    } else if t.contains("dance") {
        "Robots can dance: Atlas, ASIMO and NAO all have routines. Their favourite is, of course, the robot.".into()
    } else if t.contains("dream") {
        "Do androids dream of electric sheep? Philip K. Dick thought they might.".into()
    } else if t.contains("food") || t.contains("eat") || t.contains("fruit") {
        "Robots run on electricity, not food. WALL-E would still pick something he can compact into a cube.".into()
    } else {
        "A fun question! Robots don't have human needs, but fiction gives plenty of them personalities.".into()
    }
}

fn android_character(name: &str, format: ResponseFormat) -> String {
    let profile = match name {
        "data" => "Data: Soong-type android and operations officer of the USS Enterprise in Star Trek: \
                   The Next Generation, known for his quest to understand humanity.",
        "bishop" => "Bishop: the loyal synthetic from Aliens (1986), the crew's medic and technician.",
        "roy batty" => "Roy Batty: Nexus-6 replicant leader in Blade Runner, remembered for 'tears in rain'.",
        "ava" => "Ava: the humanoid AI of Ex Machina, built to pass a Turing test.",
        _ => return format!("{}: fictional android from science fiction.", title_case(name)),
    };
    match format {
        ResponseFormat::Summary => profile.split(',').next().unwrap_or(profile).to_string(),
        _ => profile.to_string(),
    }
}

fn robot_character(name: &str, format: ResponseFormat) -> String {
    let profile = match name {
        "wall-e" => "WALL-E: Pixar's Waste Allocation Load Lifter, Earth-Class, left alone on Earth for 700 years.",
        "c-3po" => "C-3PO: Star Wars protocol droid, fluent in over six million forms of communication.",
        "r2-d2" => "R2-D2: Star Wars astromech droid, brave and resourceful.",
        _ => return format!("{}: fictional robot from science fiction.", title_case(name)),
    };
    match format {
        ResponseFormat::Summary => profile.split(',').next().unwrap_or(profile).to_string(),
        _ => profile.to_string(),
    }
}

fn generic(topic: &str, format: ResponseFormat) -> String {
    let title = title_case(topic);
    match format {
        ResponseFormat::Summary => format!("{title}: key concepts and applications."),
        ResponseFormat::List => bullets(
            &format!("KEY ASPECTS OF {}", topic.to_uppercase()),
            &["Technical foundations", "Applications", "Components", "Challenges", "Future trends"],
        ),
        ResponseFormat::Detailed => format!(
            "{}\n\nNo article in the knowledge base covers {topic} yet. Try a related topic, \
             or ask about robotics, androids or AI.",
            topic.to_uppercase()
        ),
        ResponseFormat::Essay => format!(
            "{title}\n\nThe knowledge base has no article on {topic}. An essay needs source material; \
             ask about a neighbouring subject and the answer will draw on what is indexed."
        ),
    }
}

fn bullets(heading: &str, items: &[&str]) -> String {
    let mut out = String::from(heading);
    out.push('\n');
    for item in items {
        out.push_str("\n• ");
        out.push_str(item);
    }
    out
}

pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_formats_fall_back_to_detailed() {
        assert_eq!(ResponseFormat::parse("LIST"), ResponseFormat::List);
        assert_eq!(ResponseFormat::parse("haiku"), ResponseFormat::Detailed);
        let f: ResponseFormat = serde_json::from_str("\"essay\"").unwrap();
        assert_eq!(f, ResponseFormat::Essay);
    }

    #[test]
    fn every_category_answers_every_format() {
        let categories = [
            Category::FunQuestion,
            Category::Comparative,
            Category::SpecificAndroid,
            Category::SpecificRobot,
            Category::FictionalAndroids,
            Category::FictionalRobots,
            Category::Gundam,
            Category::Androids,
            Category::Robotics,
            Category::Ai,
            Category::Generic,
        ];
        let formats = [ResponseFormat::Summary, ResponseFormat::Detailed, ResponseFormat::List, ResponseFormat::Essay];
        for c in categories {
            for f in formats {
                assert!(!respond(c, f, "topic").is_empty(), "{c:?}/{f:?}");
            }
        }
    }

    #[test]
    fn characters_and_generic_topics_are_named() {
        assert!(respond(Category::SpecificAndroid, ResponseFormat::Detailed, "data").starts_with("Data:"));
        assert_eq!(
            respond(Category::SpecificRobot, ResponseFormat::Summary, "bender"),
            "Bender: fictional robot from science fiction."
        );
        let list = respond(Category::Generic, ResponseFormat::List, "quantum sensing");
        assert!(list.starts_with("KEY ASPECTS OF QUANTUM SENSING"));
    }
}
