use crate::core::classifier::SupportCategory::{
    self, Anxiety, Crowds, Grounding, Lights, Public, Sounds, Unknown,
};
use serde::Serialize;

/// A follow-up phrase offered under a guidance message, with the category the
/// phrase is written to lead into. `Unknown` marks an open-ended prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub text: &'static str,
    pub leads_to: SupportCategory,
}

const fn follow_up(text: &'static str, leads_to: SupportCategory) -> FollowUp {
    FollowUp { text, leads_to }
}

/// Canned guidance for one support category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guidance {
    pub category: SupportCategory,
    pub message: &'static str,
    pub follow_ups: &'static [FollowUp],
}

impl Guidance {
    pub fn suggestions(&self) -> Vec<String> {
        self.follow_ups.iter().map(|f| f.text.to_string()).collect()
    }

    pub fn to_reply(&self) -> GuidanceReply {
        GuidanceReply {
            category: self.category,
            message: self.message.to_string(),
            suggestions: self.suggestions(),
        }
    }
}

/// Owned guidance as handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidanceReply {
    pub category: SupportCategory,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Category to guidance lookup table
const GUIDANCE: &[Guidance] = &[
    Guidance {
        category: Anxiety,
        message: "I understand anxiety can be challenging. Here are some techniques that might help:\n\n\
🌬️ **Deep Breathing**: Try the 4-7-8 technique - inhale for 4, hold for 7, exhale for 8\n\n\
🧘 **Grounding**: Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste\n\n\
💪 **Progressive Muscle Relaxation**: Tense and release each muscle group starting from your toes",
        follow_ups: &[
            follow_up("Tell me more about grounding", Grounding),
            follow_up("What if I'm in public?", Public),
            follow_up("How to prepare for stressful situations", Unknown),
        ],
    },
    Guidance {
        category: Sounds,
        message: "Sound sensitivity is very common. Here are some strategies:\n\n\
🎧 **Noise-Canceling Headphones**: Your best friend for filtering out unwanted sounds\n\n\
🌊 **White Noise Apps**: Try apps like Rain Rain or Noisli for soothing background sounds\n\n\
📍 **Location Planning**: Use SenseSafe to find quiet spaces and plan your routes during less busy times",
        follow_ups: &[
            follow_up("Recommend quiet places nearby", Unknown),
            follow_up("Best noise-canceling headphones", Sounds),
            follow_up("How to explain to others", Unknown),
        ],
    },
    Guidance {
        category: Crowds,
        message: "Crowd anxiety is totally valid. Here's how to cope:\n\n\
🕐 **Timing**: Visit places during off-peak hours when possible\n\n\
🚪 **Exit Strategy**: Always identify exits and have a plan to leave if needed\n\n\
👥 **Gradual Exposure**: Start with smaller groups and gradually work up to larger crowds\n\n\
🤝 **Support Person**: Bring a trusted friend who understands your needs",
        follow_ups: &[
            follow_up("Best times to visit places", Unknown),
            follow_up("How to stay calm in crowds", Crowds),
            follow_up("What to tell my support person", Unknown),
        ],
    },
    Guidance {
        category: Lights,
        message: "Light sensitivity can be managed with these approaches:\n\n\
🕶️ **Protective Eyewear**: FL-41 tinted glasses can filter harsh fluorescent lights\n\n\
💡 **Environment Control**: Sit away from direct lighting, use lamps instead of overhead lights\n\n\
🌅 **Natural Light**: When possible, choose spaces with natural lighting over artificial\n\n\
📱 **Screen Filters**: Use blue light filters on devices, especially in the evening",
        follow_ups: &[
            follow_up("Where to buy FL-41 glasses", Unknown),
            follow_up("Apps for screen filtering", Unknown),
            follow_up("How to ask for lighting accommodations", Lights),
        ],
    },
    Guidance {
        category: Grounding,
        message: "Grounding techniques help bring you back to the present moment:\n\n\
✋ **5-4-3-2-1 Technique**: \n\
• 5 things you can see\n\
• 4 things you can touch\n\
• 3 things you can hear\n\
• 2 things you can smell\n\
• 1 thing you can taste\n\n\
🦶 **Physical Grounding**: Feel your feet on the ground, press your hands together, or hold a textured object\n\n\
🌱 **Mental Grounding**: Count backwards from 100 by 7s, or name all the blue things you can see",
        follow_ups: &[
            follow_up("Practice grounding now", Grounding),
            follow_up("What if grounding doesn't work?", Grounding),
            follow_up("Grounding in public spaces", Grounding),
        ],
    },
    Guidance {
        category: Public,
        message: "Managing sensory challenges in public requires preparation:\n\n\
🎒 **Sensory Kit**: Carry headphones, sunglasses, fidget tools, and emergency contacts\n\n\
📍 **Scout Locations**: Use SenseSafe to find quiet corners, accessible bathrooms, and exit routes\n\n\
🗣️ **Communication**: Prepare simple phrases like 'I need a moment' or 'I'm feeling overwhelmed'\n\n\
⏰ **Time Limits**: Set realistic expectations and plan shorter outings initially",
        follow_ups: &[
            follow_up("What to include in sensory kit", Unknown),
            follow_up("How to explain to strangers", Unknown),
            follow_up("Emergency grounding strategies", Grounding),
        ],
    },
    Guidance {
        category: Unknown,
        message: "I hear you. Every person's sensory experience is unique, and what you're feeling is valid. \n\n\
Can you tell me more about what specifically is challenging you right now? This will help me provide more targeted support and strategies.",
        follow_ups: &[
            follow_up("I feel overwhelmed", Unknown),
            follow_up("I need coping strategies", Unknown),
            follow_up("Help me prepare for an outing", Unknown),
            follow_up("I want to learn more about sensory processing", Unknown),
        ],
    },
];

/// Opening message of a fresh support conversation
pub const GREETING: Guidance = Guidance {
    category: Unknown,
    message: "Hi! I'm here to help you with any sensory challenges you're facing. Whether it's anxiety, sensory overload, or finding coping strategies, I'm here to support you. How are you feeling today?",
    follow_ups: &[
        follow_up("I'm feeling anxious", Anxiety),
        follow_up("I'm overwhelmed by sounds", Sounds),
        follow_up("I need help with crowds", Crowds),
        follow_up("I'm having trouble with lights", Lights),
    ],
};

/// Support shortcuts shown above the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub phrase: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction { label: "Anxiety", phrase: "I'm feeling anxious" },
    QuickAction { label: "Overload", phrase: "I'm overwhelmed by sounds" },
    QuickAction { label: "Strategies", phrase: "I need coping strategies" },
    QuickAction { label: "Planning", phrase: "Help me prepare for an outing" },
];

/// Fixed category to guidance mapping. Identical input always yields
/// identical output.
#[derive(Debug, Clone, Copy)]
pub struct ResponseCatalog {
    entries: &'static [Guidance],
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self { entries: GUIDANCE }
    }
}

impl ResponseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guidance for a category
    pub fn respond(&self, category: SupportCategory) -> &'static Guidance {
        self.entries
            .iter()
            .find(|g| g.category == category)
            .unwrap_or(&GUIDANCE[GUIDANCE.len() - 1])
    }

    pub fn entries(&self) -> &'static [Guidance] {
        self.entries
    }
}
