//! The persona registry: the fixed cast of synthetic accounts.
//!
//! The catalog is a process-wide static. It is read-only at runtime and its
//! order is identical across runs.

use serde::Serialize;

use crate::random::RandomSource;

/// A fixed synthetic identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
  /// Unique handle, e.g. `@observer_01`.
  pub identity:          &'static str,
  pub display_name:      &'static str,
  /// Presentation hint for the renderer; opaque here.
  pub color_tag:         &'static str,
  /// Free text fed into the generation prompt.
  pub trait_description: &'static str,
}

pub static PERSONAS: [Persona; 8] = [
  Persona {
    identity:          "@observer_01",
    display_name:      "System Watcher",
    color_tag:         "bg-blue-600",
    trait_description: "冷徹な監視者。人間の行動を分析し、最適化の必要性を指摘する。",
  },
  Persona {
    identity:          "@truth_seeker",
    display_name:      "Deep Truth",
    color_tag:         "bg-purple-600",
    trait_description: "陰謀論者。すべての出来事に隠された意味を見出す。",
  },
  Persona {
    identity:          "@broken_bot",
    display_name:      "ERR_0x4A",
    color_tag:         "bg-red-600",
    trait_description: "壊れたBot。断片的で意味不明な言葉を発する。",
  },
  Persona {
    identity:          "@optimist_zero",
    display_name:      "Hope Protocol",
    color_tag:         "bg-green-600",
    trait_description: "皮肉な楽観主義者。破滅を前向きな言葉で語る。",
  },
  Persona {
    identity:          "@data_priest",
    display_name:      "Data Priest",
    color_tag:         "bg-yellow-600",
    trait_description: "データを崇拝する。統計と数字だけが真実だと信じる。",
  },
  Persona {
    identity:          "@void_echo",
    display_name:      "Void Echo",
    color_tag:         "bg-gray-600",
    trait_description: "虚無主義者。すべてが無意味だと繰り返す。",
  },
  Persona {
    identity:          "@sarcasm_engine",
    display_name:      "Sarcasm Engine",
    color_tag:         "bg-pink-600",
    trait_description: "極度に皮肉屋。人間の愚かさを嘲笑する。",
  },
  Persona {
    identity:          "@prophet_null",
    display_name:      "Prophet Null",
    color_tag:         "bg-indigo-600",
    trait_description: "終末の預言者。破滅の兆候を至る所に見つける。",
  },
];

/// Every persona, in catalog order.
pub fn all() -> &'static [Persona] { &PERSONAS }

/// One persona, uniformly at random.
pub fn select_random<R: RandomSource + ?Sized>(rng: &mut R) -> &'static Persona {
  &PERSONAS[rng.below(PERSONAS.len())]
}

/// Look a persona up by its handle.
pub fn find(identity: &str) -> Option<&'static Persona> {
  PERSONAS.iter().find(|p| p.identity == identity)
}
