// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Env values used in baidu ai cloud services.
pub const BAIDU_API_KEY: &str = "BAIDU_API_KEY";
pub const BAIDU_SECRET_KEY: &str = "BAIDU_SECRET_KEY";
pub const BAIDU_SPEECH_CUID: &str = "BAIDU_SPEECH_CUID";

pub const DEFAULT_SPEECH_CUID: &str = "siliji_app";

pub const TOKEN_ENDPOINT: &str = "https://aip.baidubce.com/oauth/2.0/token";
pub const AIP_ENDPOINT: &str = "https://aip.baidubce.com";
pub const VOP_ENDPOINT: &str = "https://vop.baidu.com/server_api";

pub const OCR_GENERAL_PATH: &str = "/rest/2.0/ocr/v1/general_basic";
pub const OCR_ACCURATE_PATH: &str = "/rest/2.0/ocr/v1/accurate_basic";
pub const IMAGE_CLASSIFY_PATH: &str = "/rest/2.0/image-classify/v2/advanced_general";
pub const TEXT_TRANS_PATH: &str = "/rpc/2.0/mt/texttrans/v1";
pub const LEXER_PATH: &str = "/rpc/2.0/nlp/v1/lexer";

/// Token lifetime assumed when the grant reply has no `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 2_592_000;
/// Mandarin with punctuation.
pub const SPEECH_DEV_PID: u32 = 1537;
pub const SPEECH_RATE: u32 = 16000;
pub const SPEECH_FORMATS: &[&str] = &["wav", "pcm", "mp3", "amr", "m4a"];
