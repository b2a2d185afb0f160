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

// Env values used in tencent cloud services.
pub const TENCENTCLOUD_REGION: &str = "TENCENTCLOUD_REGION";
pub const TENCENTCLOUD_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const TENCENTCLOUD_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const TENCENTCLOUD_TOKEN: &str = "TENCENTCLOUD_TOKEN";
pub const TENCENTCLOUD_SECURITY_TOKEN: &str = "TENCENTCLOUD_SECURITY_TOKEN";

pub const DEFAULT_REGION: &str = "ap-guangzhou";

pub const OCR_ENDPOINT: &str = "https://ocr.tencentcloudapi.com/";
pub const OCR_VERSION: &str = "2018-11-19";
pub const TIIA_ENDPOINT: &str = "https://tiia.tencentcloudapi.com/";
pub const TIIA_VERSION: &str = "2019-05-29";
pub const ASR_ENDPOINT: &str = "https://asr.tencentcloudapi.com/";
pub const ASR_VERSION: &str = "2019-06-14";
pub const ASR_ENGINE_MODEL: &str = "16k_zh";

// TC3 signing.
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const SIGNED_HEADERS: &str = "content-type;host";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub const X_TC_ACTION: &str = "x-tc-action";
pub const X_TC_REGION: &str = "x-tc-region";
pub const X_TC_TIMESTAMP: &str = "x-tc-timestamp";
pub const X_TC_TOKEN: &str = "x-tc-token";
pub const X_TC_VERSION: &str = "x-tc-version";
