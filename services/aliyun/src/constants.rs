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

// Env values used in aliyun services.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
pub const ALIBABA_CLOUD_NLS_APP_KEY: &str = "ALIBABA_CLOUD_NLS_APP_KEY";
pub const ALIBABA_CLOUD_REGION_ID: &str = "ALIBABA_CLOUD_REGION_ID";

pub const DEFAULT_REGION_ID: &str = "cn-shanghai";

// API versions of the RPC style products.
pub const OCR_VERSION: &str = "2019-12-30";
pub const IMAGERECOG_VERSION: &str = "2019-09-30";
pub const NLS_META_VERSION: &str = "2019-02-28";

// Headers used in ACS signing.
pub const X_ACS_SIGNATURE_NONCE: &str = "x-acs-signature-nonce";
pub const X_ACS_SIGNATURE_METHOD: &str = "x-acs-signature-method";
pub const X_ACS_SIGNATURE_VERSION: &str = "x-acs-signature-version";
pub const X_ACS_VERSION: &str = "x-acs-version";
pub const X_NLS_TOKEN: &str = "x-nls-token";

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

// NLS one-shot recognition.
pub const NLS_SUCCESS_STATUS: i64 = 20000000;
pub const NLS_SAMPLE_RATE: &str = "16000";
