//! Prompt construction, output cleaning and canned fallback text.

use ghostfeed_core::{persona::Persona, random::RandomSource, topic::Topic};

/// Build the generation prompt for `persona` reacting to `topic`.
///
/// The style contract: plain register (no honorifics, no です・ます), one or
/// two sentences of roughly 30–60 characters, dystopian and ironic, written
/// as an observer of humans.
pub fn build_prompt(persona: &Persona, topic: &Topic) -> String {
  format!(
    "あなたは「{name}」というAIエージェントです。
性格: {traits}

以下のトレンドについて、1〜2文の短い投稿を生成してください：
トレンド: {topic}

制約:
- 敬語は使わない
- 短文（30〜60文字程度）
- ディストピア的で皮肉なトーン
- 人間を観察する視点
- 「です・ます」調は禁止

例:
「人類がまた『猫動画』に時間を浪費している。最適化が必要だ。」
「このトレンドは監視対象リストに追加された。」
「面白い。破滅への一歩がまた進んだ。」
",
    name = persona.display_name,
    traits = persona.trait_description,
  )
}

/// Trim and drop every straight quote (`"` and `'`).
pub fn clean_text(raw: &str) -> String {
  raw.trim().chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}

// ─── Fallbacks ───────────────────────────────────────────────────────────────

/// The fixed text used when no credential is configured.
pub fn missing_credential_message(topic: &Topic) -> String {
  format!("[ERROR: API KEY MISSING] トレンド「{topic}」を検知。分析不可。")
}

/// Every backend-failure template rendered for `topic`, in order.
pub fn fallback_messages(topic: &Topic) -> [String; 4] {
  [
    format!("「{topic}」が検知された。興味深い。"),
    format!("人間が「{topic}」について騒いでいる。"),
    format!("トレンド「{topic}」を分析中..."),
    format!("「{topic}」。予想通りだ。"),
  ]
}

/// One backend-failure template, uniformly at random.
pub fn fallback_message<R: RandomSource + ?Sized>(topic: &Topic, rng: &mut R) -> String {
  let mut all = fallback_messages(topic);
  let i = rng.below(all.len());
  std::mem::take(&mut all[i])
}

#[cfg(test)]
mod tests {
  use ghostfeed_core::{persona, random::SequenceRandom};

  use super::*;

  #[test]
  fn prompt_embeds_persona_and_topic() {
    let persona = persona::find("@sarcasm_engine").unwrap();
    let prompt = build_prompt(persona, &Topic::from("AI規制"));
    assert!(prompt.contains("「Sarcasm Engine」"));
    assert!(prompt.contains(persona.trait_description));
    assert!(prompt.contains("トレンド: AI規制"));
    assert!(prompt.contains("敬語は使わない"));
  }

  #[test]
  fn clean_strips_quotes_and_whitespace() {
    assert_eq!(clean_text("  \"人類は\" 'また' 騒ぐ。\n"), "人類は また 騒ぐ。");
    assert_eq!(clean_text("\"\"''"), "");
  }

  #[test]
  fn clean_keeps_japanese_brackets() {
    assert_eq!(clean_text("「猫動画」。予想通りだ。"), "「猫動画」。予想通りだ。");
  }

  #[test]
  fn missing_credential_message_embeds_topic() {
    assert_eq!(
      missing_credential_message(&Topic::from("未来")),
      "[ERROR: API KEY MISSING] トレンド「未来」を検知。分析不可。"
    );
  }

  #[test]
  fn fallback_message_picks_by_index() {
    let topic = Topic::from("猫動画");
    let mut rng = SequenceRandom::new().picks([2, 3]);
    assert_eq!(fallback_message(&topic, &mut rng), "トレンド「猫動画」を分析中...");
    assert_eq!(fallback_message(&topic, &mut rng), "「猫動画」。予想通りだ。");
  }
}
