// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drive [`Readline::run`] end to end, with mocked input and output devices.

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use r3bl_readline::{InputDevice, InputDeviceExt, KeyDecoderMock, KeyEvent, OutputDevice,
                    Readline, ReadlineEvent, ReadlineInput, ReadlineOptions, Size,
                    StdoutMock};
use smallvec::smallvec;
use std::time::Duration;

fn data(bytes: &[u8]) -> ReadlineInput { ReadlineInput::Data(bytes.to_vec()) }

fn new_readline(stdout_mock: &StdoutMock) -> (Readline, r3bl_readline::ReadlineReceiver) {
    let options = ReadlineOptions::default()
        .with_output_device(OutputDevice::new(stdout_mock.clone()))
        .with_key_decoder(KeyDecoderMock::default());
    Readline::new(options)
}

#[tokio::test]
async fn test_session_with_history_and_crlf() {
    let stdout_mock = StdoutMock::default().with_size(Size::new(80, 24));
    let (mut readline, receiver) = new_readline(&stdout_mock);

    let input_device = InputDevice::new_mock(smallvec![
        data(b"hello wor"),
        data(b"ld\r\n"),
        data(b"second\r"),
        // Back two entries and forward one, then edit the recalled entry.
        data(b"\x1b[A\x1b["),
        data(b"A\x1b[B"),
        data(b"!\r"),
    ]);

    readline.run(input_device).await.unwrap();

    // The end of the input stream closes the editor.
    assert!(readline.is_closed());

    let lines: Vec<String> = receiver.into_line_stream().collect().await;
    assert_eq!(lines, vec!["hello world", "second", "second!"]);

    assert_eq!(
        readline.history().to_vec(),
        vec!["second!", "second", "hello world"]
    );

    // Only the `\n` of each `\r\n` survives stripping.
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.contains("> hello world\n"), "got: {output:?}");
    assert!(output.ends_with("> second!\n"), "got: {output:?}");
}

#[tokio::test]
async fn test_session_closed_by_ctrl_d() {
    let stdout_mock = StdoutMock::default();
    let (mut readline, mut receiver) = new_readline(&stdout_mock);

    let input_device = InputDevice::new_mock_with_delay(
        smallvec![
            data(b"one\r"),
            data(b"two\x04"),
            // Never handled: the editor is closed by then.
            data(b"three\r"),
        ],
        Duration::from_millis(1),
    );

    readline.run(input_device).await.unwrap();

    assert_eq!(receiver.recv().await, Some(ReadlineEvent::Line("one".into())));
    assert_eq!(
        receiver.recv().await,
        Some(ReadlineEvent::History(vec!["one".into()]))
    );
    assert_eq!(receiver.recv().await, None);
    assert_eq!(readline.line(), "");
}

#[tokio::test]
async fn test_session_with_keys_resize_and_menu() {
    let stdout_mock = StdoutMock::default().with_size(Size::new(80, 24));
    let (mut readline, mut receiver) = new_readline(&stdout_mock);

    readline.apply_input(data(b"ab")).unwrap();
    readline
        .show_options(Some(vec!["first".into(), "second".into()]))
        .unwrap();

    stdout_mock.set_size(Some(Size::new(40, 10)));

    let input_device = InputDevice::new_mock(smallvec![
        ReadlineInput::Resize,
        ReadlineInput::Key(KeyEvent::named("down")),
        ReadlineInput::Key(KeyEvent::named("return")),
        ReadlineInput::Key(KeyEvent::named("c")),
        ReadlineInput::Key(KeyEvent::named("return")),
    ]);

    readline.run(input_device).await.unwrap();

    assert_eq!(readline.term_size(), Size::new(40, 10));
    assert_eq!(
        receiver.drain(),
        vec![
            ReadlineEvent::OptionSelected("second".into()),
            ReadlineEvent::Line("abc".into()),
            ReadlineEvent::History(vec!["abc".into()]),
        ]
    );
}
