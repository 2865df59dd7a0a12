use serde::{Deserialize, Serialize};

/// The closed set of emotions the quiz asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
  Happiness,
  Sadness,
  Fear,
  Anger,
  Disgust,
  Surprise,
  Contempt,
  Trust,
  Love,
  Anticipation,
}

impl Emotion {
  /// Every emotion, in catalog order
  pub const ALL: [Emotion; 10] = [
    Self::Happiness,
    Self::Sadness,
    Self::Fear,
    Self::Anger,
    Self::Disgust,
    Self::Surprise,
    Self::Contempt,
    Self::Trust,
    Self::Love,
    Self::Anticipation,
  ];

  /// Stable identifier, also used in cache file names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Happiness => "HAPPINESS",
      Self::Sadness => "SADNESS",
      Self::Fear => "FEAR",
      Self::Anger => "ANGER",
      Self::Disgust => "DISGUST",
      Self::Surprise => "SURPRISE",
      Self::Contempt => "CONTEMPT",
      Self::Trust => "TRUST",
      Self::Love => "LOVE",
      Self::Anticipation => "ANTICIPATION",
    }
  }

  /// Parse an identifier, ignoring case ("fear", "FEAR", "Fear")
  pub fn from_str(s: &str) -> Option<Self> {
    let upper = s.trim().to_ascii_uppercase();
    Self::ALL.into_iter().find(|e| e.as_str() == upper)
  }

  /// Localized label shown to the player and stored in history
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Happiness => "Hạnh phúc",
      Self::Sadness => "Buồn",
      Self::Fear => "Sợ hãi",
      Self::Anger => "Giận dữ",
      Self::Disgust => "Ghê tởm",
      Self::Surprise => "Ngạc nhiên",
      Self::Contempt => "Khinh thường",
      Self::Trust => "Tin tưởng",
      Self::Love => "Yêu thương",
      Self::Anticipation => "Mong đợi",
    }
  }

  /// Seed for the placeholder avatar service. Same emotion, same seed.
  pub fn placeholder_seed(&self) -> String {
    self.as_str().to_lowercase()
  }

  pub fn image_prompt(&self) -> &'static str {
    match self {
      Self::Happiness => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear happiness, throwing head back in laughter, hands clapping or raised in joy, relaxed and open body posture, natural lighting, genuine atmosphere."
      }
      Self::Sadness => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear sadness, sitting with slumped shoulders, face buried in hands or hugging their knees, body curled inwards, looking down, gloomy and soft lighting."
      }
      Self::Fear => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear fear, backing away defensively, hands raised to protect the face, body trembling and shrinking back, wide eyes, dramatic shadows."
      }
      Self::Anger => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear anger, standing aggressively, clenching fists tight at sides, leaning forward with tension in neck and shoulders, intense shouting expression."
      }
      Self::Disgust => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear disgust, turning their body away from the camera, holding a hand up to block the view or covering their nose/mouth, recoiling posture."
      }
      Self::Surprise => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear surprise, hands instinctively flying to cover the mouth or clutching the chest, jaw dropped, body jolted back in shock."
      }
      Self::Contempt => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear contempt, crossing arms tightly across the chest, looking down their nose with a sneer, leaning back with a superior and dismissive attitude."
      }
      Self::Trust => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear trust, standing with open palms, offering a handshake or hand placed sincerely on their heart, relaxed shoulders, warm and welcoming body language."
      }
      Self::Love => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear love, leaning forward gently, hands pressed affectionately to their chest or reaching out softly, head tilted to the side, warm and soft focus."
      }
      Self::Anticipation => {
        "Photorealistic shot of a diverse person in a real-world setting showing clear anticipation, leaning forward on a surface or rubbing hands together eagerly, looking towards the side with intent focus, fidgeting with excitement."
      }
    }
  }
}

impl std::fmt::Display for Emotion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
