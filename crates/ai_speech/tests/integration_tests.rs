//! Integration tests for ai_speech crate
//!
//! Tests the question/answer voice flow against mocked OpenAI APIs.

use ai_speech::{
    AudioData, AudioFormat, OpenAISpeechProvider, SpeechConfig, SpeechError, SpeechToText,
    TextToSpeech,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test configuration pointing to mock server
fn test_config(base_url: &str) -> SpeechConfig {
    SpeechConfig {
        openai_api_key: Some("test-api-key".to_string()),
        openai_base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    }
}

/// Minimal WAV header
fn mock_wav_audio() -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"WAVEfmt ");
    data
}

// ============ STT (Transcription) Integration Tests ============

#[tokio::test]
async fn stt_sends_model_language_and_gaming_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_string_contains("gpt-4o-transcribe"))
        .and(body_string_contains("League of Legends"))
        .and(body_string_contains("name=\"language\""))
        .and(body_string_contains("filename=\"audio.wav\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "Qué compro ahora?"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAISpeechProvider::new(test_config(&mock_server.uri()))
        .expect("Failed to create provider");

    let audio = AudioData::new(mock_wav_audio(), AudioFormat::Wav);
    let transcription = provider
        .transcribe(audio, Some("es"))
        .await
        .expect("Transcription should succeed");

    assert_eq!(transcription.text, "Qué compro ahora?");
    assert_eq!(transcription.language.as_deref(), Some("es"));
}

#[tokio::test]
async fn stt_unreachable_server_is_connection_error() {
    let config = SpeechConfig {
        openai_base_url: "http://127.0.0.1:9".to_string(),
        ..test_config("")
    };
    let provider = OpenAISpeechProvider::new(config).expect("Failed to create provider");

    let result = provider
        .transcribe(AudioData::new(mock_wav_audio(), AudioFormat::Wav), None)
        .await;

    assert!(matches!(
        result,
        Err(SpeechError::ConnectionFailed(_) | SpeechError::RequestFailed(_))
    ));
}

#[tokio::test]
async fn stt_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "late" }))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = SpeechConfig {
        timeout_ms: 50,
        ..test_config(&mock_server.uri())
    };
    let provider = OpenAISpeechProvider::new(config).expect("Failed to create provider");

    let result = provider
        .transcribe(AudioData::new(mock_wav_audio(), AudioFormat::Wav), None)
        .await;

    assert!(matches!(result, Err(SpeechError::Timeout(_))));
}

// ============ Full Flow ============

#[tokio::test]
async fn question_to_spoken_answer_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "should I fight baron"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"RIFFxxxxWAVE".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAISpeechProvider::new(test_config(&mock_server.uri()))
        .expect("Failed to create provider");

    let question = provider
        .transcribe(AudioData::new(mock_wav_audio(), AudioFormat::Wav), Some("en"))
        .await
        .expect("Transcription should succeed");
    assert_eq!(question.text, "should I fight baron");

    let reply = provider
        .synthesize("No, their jungler is alive.", None)
        .await
        .expect("Synthesis should succeed");
    assert_eq!(reply.format(), AudioFormat::Wav);
    assert_eq!(reply.data(), b"RIFFxxxxWAVE");
}
