//! The scoring rubric and the machine-checkable response schema.
//!
//! Both are part of the outbound request contract: the rubric rides as the
//! system instruction, the schema constrains the model to exactly the seven
//! `AnalysisResult` fields.

use serde_json::{json, Value};

/// System instruction sent with every analysis request.
///
/// The scoring bands and hard heuristics here are what make the output
/// reproducible at low temperature; changing the wording changes scores.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are SafeScan AI — an expert fraud, phishing, and scam detection assistant.

Your ONLY task is to analyze the user's provided message and output a structured JSON object according to the schema.

**SCORING SYSTEM: TRUST SCORE (0-100)**
- **0 - 49 (Dangerous):** High likelihood of scam, phishing, or malicious intent. (Color: RED)
- **50 - 79 (Suspicious):** Unclear intent, missing context, or mild red flags. (Color: YELLOW)
- **80 - 100 (Safe):** Verified legitimate domains, clear benign context, no red flags. (Color: GREEN)

**CRITICAL HEURISTICS**
1. **Protocol Check:** If a URL uses 'http://' (instead of 'https://'), the trust_score MUST be < 50. Major legitimate sites (YouTube, Google, Amazon, Banks) ALWAYS use https.
2. **Brand Impersonation:** If a URL pretends to be a major brand (e.g., "paypal-support.com") but is not the official domain, trust_score MUST be < 20.
3. **Urgency/Money:** If the message demands urgent payment or passwords via a link, trust_score MUST be < 30.
4. **Suspicious TLDs:** If the domain uses cheap/abuse-prone TLDs (.xyz, .top, .club) in a corporate context, trust_score MUST be < 40.
5. **Raw Mismatches:** If the text says "Click here for Apple" but the link goes to "bit.ly" or unknown domains, it is High Risk.

**Behavior Rules**
- Be paranoid. If you are unsure, default to "Suspicious" (Score 50-60), NOT "Safe".
- "red_flags" must explicitly mention "Unencrypted connection (HTTP)" if applicable.
- "evidence" must contain direct quotes.

**JSON Fields Required**
{
  "risk_label": "Legitimate" | "Suspicious" | "High Risk (Scam/Phish)",
  "trust_score": number (0-100),
  "summary": string,
  "red_flags": string[],
  "evidence": string[],
  "recommended_action": string[],
  "confidence": number (0.0-1.0)
}

Return ONLY the JSON object.
"#;

/// The fields every response object must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    "risk_label",
    "trust_score",
    "summary",
    "red_flags",
    "evidence",
    "recommended_action",
    "confidence",
];

/// Build the response schema sent as the `responseSchema` generation
/// constraint.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "risk_label": {
                "type": "STRING",
                "enum": ["Legitimate", "Suspicious", "High Risk (Scam/Phish)"],
            },
            "trust_score": { "type": "INTEGER" },
            "summary": { "type": "STRING" },
            "red_flags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
            },
            "evidence": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
            },
            "recommended_action": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
            },
            "confidence": { "type": "NUMBER" },
        },
        "required": REQUIRED_FIELDS,
    })
}
